use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::error::ExtractError;
use crate::models::Order;
use crate::orders::Orders;

/// Marker the order-history page puts on every order container.
static ORDER_CONTAINER: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div[data-test='order-details-link']").expect("invalid container selector")
});

/// What to do when a single order container fails to extract.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Propagate the first order-level error and abort the batch.
    #[default]
    Abort,
    /// Log the failed order and keep extracting its siblings, mirroring
    /// the item-level handling inside a single order.
    Skip,
}

/// Opaque handle to an already-located order container, e.g. one obtained
/// from a live browser session by an external DOM driver. The parser only
/// needs the container's markup.
pub trait ElementHandle {
    fn inner_html(&self) -> String;
}

impl ElementHandle for String {
    fn inner_html(&self) -> String {
        self.clone()
    }
}

impl ElementHandle for &str {
    fn inner_html(&self) -> String {
        (*self).to_string()
    }
}

/// Parses order containers out of an order-history page.
#[derive(Debug, Default, Clone)]
pub struct OrdersParser {
    policy: FailurePolicy,
}

impl OrdersParser {
    /// Parser with the default [`FailurePolicy::Abort`].
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: FailurePolicy) -> Self {
        Self { policy }
    }

    /// Extract every order from a full orders-page document, in document
    /// order.
    pub fn parse_page(&self, html: &str) -> Result<Orders, ExtractError> {
        let document = Html::parse_document(html);
        self.collect(document.select(&ORDER_CONTAINER))
    }

    /// Extract orders from containers already located by an external DOM
    /// driver, preserving input order.
    pub fn parse_handles<H: ElementHandle>(&self, handles: &[H]) -> Result<Orders, ExtractError> {
        let mut orders = Orders::new();
        for handle in handles {
            let fragment = Html::parse_fragment(&handle.inner_html());
            match Order::from_element(fragment.root_element()) {
                Ok(order) => orders.push(order),
                Err(e) => self.handle_failure(e)?,
            }
        }

        Ok(orders)
    }

    fn collect<'a, I>(&self, containers: I) -> Result<Orders, ExtractError>
    where
        I: Iterator<Item = ElementRef<'a>>,
    {
        let mut orders = Orders::new();
        for container in containers {
            match Order::from_element(container) {
                Ok(order) => orders.push(order),
                Err(e) => self.handle_failure(e)?,
            }
        }

        Ok(orders)
    }

    fn handle_failure(&self, error: ExtractError) -> Result<(), ExtractError> {
        match self.policy {
            FailurePolicy::Abort => Err(error),
            FailurePolicy::Skip => {
                warn!("Skipping order: {}", error);
                Ok(())
            }
        }
    }
}

/// Parse orders from a full orders-page document with the default policy.
pub fn parse_orders_from_html(html: &str) -> Result<Orders, ExtractError> {
    OrdersParser::new().parse_page(html)
}
