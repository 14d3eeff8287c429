//! Business layer of the ERP desk front-end.
//!
//! Everything here is UI-agnostic: the table model, the menu permission tree,
//! the REST collaborators and the session they run under.

pub mod api;
mod config;
pub mod error;
pub mod http;
pub mod menu;
pub mod sequence;
mod session;
pub mod table;

pub use config::{BusinessConfig, DEFAULT_PAGE_SIZE};
pub use error::{ApiError, ApiResult};
pub use sequence::{RequestSequence, RequestTicket, Sequenced};
pub use session::{Session, SessionUser};
