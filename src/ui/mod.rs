mod gallery;
mod notify;
mod render;
mod upload;

pub use gallery::{
    DeleteOutcome, FetchOutcome, GalleryView, GalleryViewModel, RefreshReceiver, RefreshSender,
    RefreshSignal,
};
pub use notify::{LogNotifier, Notice, Notifier, TerminalNotifier};
pub use render::{render_card, render_gallery};
pub use upload::{SubmitOutcome, UploadFormController};
