//! Extraction of structured purchase-order records from a Target.com
//! order-history page.
//!
//! The input is either a full saved HTML snapshot ([`parse_orders_from_html`],
//! [`OrdersParser::parse_page`]) or the inner HTML of order containers already
//! located by an external DOM driver ([`OrdersParser::parse_handles`]).
//! Extraction is synchronous tree traversal with no shared state; failures are
//! reported per field, per item, and per order (see [`ExtractError`] and
//! [`FailurePolicy`]).

pub mod error;
pub mod locator;
pub mod models;
pub mod orders;
pub mod parser;

pub use error::ExtractError;
pub use models::{Order, OrderItem};
pub use orders::Orders;
pub use parser::{parse_orders_from_html, ElementHandle, FailurePolicy, OrdersParser};
