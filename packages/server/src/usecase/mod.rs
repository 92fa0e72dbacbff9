//! UseCase 層
//!
//! 操作ごとに 1 つのユースケース。共有スロットを変更する（または
//! スナップショットを配送する）ユースケースはすべて同じ [`FanoutLock`]
//! を共有し、更新とファンアウトを 1 単位として直列化する。

mod clear_share;
mod connect_session;
mod disconnect_session;
mod error;
mod fanout_lock;
mod get_board_status;
mod get_current_content;
mod share_file;
mod share_text;

pub use clear_share::ClearShareUseCase;
pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::{ConnectError, DisconnectError, ShareError};
pub use fanout_lock::FanoutLock;
pub use get_board_status::{BoardStatus, GetBoardStatusUseCase};
pub use get_current_content::GetCurrentContentUseCase;
pub use share_file::ShareFileUseCase;
pub use share_text::ShareTextUseCase;
