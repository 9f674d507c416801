use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use scraper::ElementRef;
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

use crate::error::ExtractError;
use crate::locator::{find_all, find_first, inner_text, ElementQuery};

/// Storefront root, used to resolve relative thumbnail URLs.
const BASE_URL: &str = "https://www.target.com/";

/// Date format used by the order-history page, e.g. "Jan 05, 2024".
const ORDER_DATE_FORMAT: &str = "%b %d, %Y";

static TOTAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\$\d").expect("invalid regex: order total"));

static ORDER_NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#\d+").expect("invalid regex: order number"));

static ORDER_URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/orders/").expect("invalid regex: order URL"));

static STORE_BASE: LazyLock<Url> =
    LazyLock::new(|| Url::parse(BASE_URL).expect("invalid base URL"));

/// One purchased product inside an order: the thumbnail's alt text and
/// image URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub image_url: Url,
}

impl OrderItem {
    /// Extract an item from a thumbnail element.
    ///
    /// `element` is expected to be an `<img>`; if it is not, the first
    /// descendant `<img>` is used instead. A missing `alt` yields an empty
    /// name, a missing `src` is fatal to the item.
    pub fn from_element(element: ElementRef<'_>) -> Result<Self, ExtractError> {
        let image = if element.value().name() == "img" {
            element
        } else {
            find_first(element, &ElementQuery::tag("img"))
                .ok_or(ExtractError::ElementNotFound("Image element not found"))?
        };

        let name = image.value().attr("alt").unwrap_or_default().to_string();
        let src = image
            .value()
            .attr("src")
            .ok_or(ExtractError::MissingAttribute("src"))?;

        Ok(Self {
            name,
            image_url: parse_image_url(src)?,
        })
    }
}

/// Parse a thumbnail `src`, resolving relative paths against the
/// storefront base.
fn parse_image_url(src: &str) -> Result<Url, ExtractError> {
    match Url::parse(src) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            STORE_BASE.join(src).map_err(|source| ExtractError::InvalidUrl {
                value: src.to_string(),
                source,
            })
        }
        Err(source) => Err(ExtractError::InvalidUrl {
            value: src.to_string(),
            source,
        }),
    }
}

/// One purchase order as shown on the order-history page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_date: NaiveDate,
    pub order_total: Decimal,
    pub order_number: String,
    pub order_url: String,
    pub delivery_status: String,
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Extract an order from its container fragment.
    ///
    /// The five scalar fields are located by independent passes over the
    /// same fragment; any one of them missing or unparseable aborts the
    /// whole order. Item failures only shorten the `items` list.
    pub fn from_element(container: ElementRef<'_>) -> Result<Self, ExtractError> {
        Ok(Self {
            order_date: parse_order_date(container)?,
            order_total: parse_order_total(container)?,
            order_number: parse_order_number(container)?,
            order_url: parse_order_url(container)?,
            delivery_status: parse_delivery_status(container)?,
            items: parse_items(container),
        })
    }
}

fn parse_order_date(container: ElementRef<'_>) -> Result<NaiveDate, ExtractError> {
    let element = find_first(container, &ElementQuery::tag("p").class("h-text-bold"))
        .ok_or(ExtractError::ElementNotFound("Date element not found"))?;
    let text = inner_text(element);
    let text = text.trim();

    NaiveDate::parse_from_str(text, ORDER_DATE_FORMAT)
        .map_err(|e| ExtractError::parse_value("order_date", text, e))
}

fn parse_order_total(container: ElementRef<'_>) -> Result<Decimal, ExtractError> {
    let element = find_first(container, &ElementQuery::tag("p").text_matches(&TOTAL_PATTERN))
        .ok_or(ExtractError::ElementNotFound("Total element not found"))?;
    let text = inner_text(element);
    let amount = text.trim().replace(['$', ','], "");

    amount
        .parse::<Decimal>()
        .map_err(|e| ExtractError::parse_value("order_total", amount, e))
}

fn parse_order_number(container: ElementRef<'_>) -> Result<String, ExtractError> {
    let element = find_first(
        container,
        &ElementQuery::tag("p").text_matches(&ORDER_NUMBER_PATTERN),
    )
    .ok_or(ExtractError::ElementNotFound("Order number element not found"))?;
    let text = inner_text(element);

    Ok(text.trim().trim_start_matches('#').to_string())
}

fn parse_order_url(container: ElementRef<'_>) -> Result<String, ExtractError> {
    let element = find_first(
        container,
        &ElementQuery::tag("a").attr_matches("href", &ORDER_URL_PATTERN),
    )
    .ok_or(ExtractError::ElementNotFound("Order URL element not found"))?;

    // The predicate guarantees the attribute is present.
    let href = element.value().attr("href").unwrap_or_default();
    Ok(href.to_string())
}

fn parse_delivery_status(container: ElementRef<'_>) -> Result<String, ExtractError> {
    let element = find_first(container, &ElementQuery::tag("h2")).ok_or(
        ExtractError::ElementNotFound("Delivery status element not found"),
    )?;

    Ok(inner_text(element).trim().to_string())
}

/// Collect every thumbnail carrying both `alt` and `src`. A thumbnail
/// that still fails to extract is logged and skipped; missing product
/// images must not block recording that a purchase occurred.
fn parse_items(container: ElementRef<'_>) -> Vec<OrderItem> {
    let thumbnails = find_all(container, &ElementQuery::tag("img").has_attr("alt").has_attr("src"));

    let mut items = Vec::with_capacity(thumbnails.len());
    for thumbnail in thumbnails {
        match OrderItem::from_element(thumbnail) {
            Ok(item) => items.push(item),
            Err(e) => warn!("Skipping order item: {}", e),
        }
    }

    items
}
