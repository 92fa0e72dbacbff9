//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{
    entity::{BoardSnapshot, FileShare, FileShareInput, Session, TextShare},
    value_object::TextContent,
};

/// Board Repository trait
///
/// 回覧板（共有スロット）へのインターフェース。UseCase 層はこの trait に
/// 依存し、Infrastructure 層の具体的な実装には依存しない。
///
/// set 操作は常に成功する：id とタイムスタンプを新規生成し、スロットを
/// 無条件に置き換えて、実際にインストールされたレコードをそのまま返す。
/// 入力の検証は呼び出し側（UseCase 層）の責務。
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// テキストスロットを置き換え、インストールされたレコードを返す
    async fn set_text(&self, content: TextContent, owner: &Session) -> TextShare;

    /// テキストスロットを空にする。何かが存在していたかを返す。
    async fn clear_text(&self) -> bool;

    /// 現在のテキスト共有を取得
    async fn get_text(&self) -> Option<TextShare>;

    /// ファイルスロットを置き換え、インストールされたレコードを返す
    async fn set_file(&self, input: FileShareInput, owner: &Session) -> FileShare;

    /// ファイルスロットを空にする。何かが存在していたかを返す。
    async fn clear_file(&self) -> bool;

    /// 現在のファイル共有を取得
    async fn get_file(&self) -> Option<FileShare>;

    /// 両スロットを一貫して読み取る
    async fn snapshot(&self) -> BoardSnapshot;
}
