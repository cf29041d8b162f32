mod client;
mod draft;
mod error;
mod kind;
mod transport;
mod types;

#[cfg(test)]
pub mod testing;

pub use client::MediaStoreClient;
pub use draft::Draft;
pub use error::{DraftError, StoreError};
pub use kind::{Counter, Field, Kind, KindSpec, UnknownKind};
pub use transport::{HttpRequest, HttpResponse, Method, ReqwestTransport, Transport};
pub use types::{MediaDetails, MediaItem};
