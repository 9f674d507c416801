use regex::Regex;
use scraper::ElementRef;

/// Predicate describing one markup anchor: a tag name plus optional
/// class/attribute/text constraints. All given constraints must hold.
#[derive(Debug, Default, Clone)]
pub struct ElementQuery<'a> {
    tag: &'a str,
    class: Option<&'a str>,
    attrs: Vec<&'a str>,
    attr_pattern: Option<(&'a str, &'a Regex)>,
    text_pattern: Option<&'a Regex>,
}

impl<'a> ElementQuery<'a> {
    /// Match elements with the given tag name.
    pub fn tag(tag: &'a str) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    /// Require `name` to appear among the element's class tokens.
    pub fn class(mut self, name: &'a str) -> Self {
        self.class = Some(name);
        self
    }

    /// Require the attribute `name` to be present, with any value.
    /// May be called multiple times.
    pub fn has_attr(mut self, name: &'a str) -> Self {
        self.attrs.push(name);
        self
    }

    /// Require the attribute `name` to be present with a value matching
    /// `pattern`.
    pub fn attr_matches(mut self, name: &'a str, pattern: &'a Regex) -> Self {
        self.attr_pattern = Some((name, pattern));
        self
    }

    /// Require the element's trimmed inner text to match `pattern`.
    pub fn text_matches(mut self, pattern: &'a Regex) -> Self {
        self.text_pattern = Some(pattern);
        self
    }

    fn matches(&self, element: ElementRef<'_>) -> bool {
        let value = element.value();

        if value.name() != self.tag {
            return false;
        }

        if let Some(class) = self.class {
            let has_class = value
                .attr("class")
                .map_or(false, |c| c.split_whitespace().any(|token| token == class));
            if !has_class {
                return false;
            }
        }

        if self.attrs.iter().any(|attr| value.attr(attr).is_none()) {
            return false;
        }

        if let Some((attr, pattern)) = self.attr_pattern {
            match value.attr(attr) {
                Some(v) if pattern.is_match(v) => {}
                _ => return false,
            }
        }

        if let Some(pattern) = self.text_pattern {
            if !pattern.is_match(inner_text(element).trim()) {
                return false;
            }
        }

        true
    }
}

/// Concatenated text of all text nodes below `element`.
/// Callers trim before matching or parsing.
pub fn inner_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// First descendant of `root`, in document order, satisfying `query`.
/// Returns `None` when nothing matches; callers attach the field name.
pub fn find_first<'a>(root: ElementRef<'a>, query: &ElementQuery<'_>) -> Option<ElementRef<'a>> {
    descendant_elements(root).find(|element| query.matches(*element))
}

/// All descendants of `root`, in document order, satisfying `query`.
pub fn find_all<'a>(root: ElementRef<'a>, query: &ElementQuery<'_>) -> Vec<ElementRef<'a>> {
    descendant_elements(root)
        .filter(|element| query.matches(*element))
        .collect()
}

/// Pre-order walk of the elements below `root`, excluding `root` itself.
fn descendant_elements<'a>(root: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
    root.descendants().skip(1).filter_map(ElementRef::wrap)
}

#[cfg(test)]
mod tests {
    use regex::Regex;
    use scraper::Html;

    use super::{find_all, find_first, inner_text, ElementQuery};

    const HTML: &str = r#"
<div>
    <p class="faded h-text-bold">Jan 05, 2024</p>
    <p>$1,234.56</p>
    <p>#112233</p>
    <a href="/orders/112233">Details</a>
    <a href="/help">Help</a>
    <h2>Delivered</h2>
    <img alt="Mug" src="https://example.com/mug.png"/>
    <img src="https://example.com/no-alt.png"/>
</div>
"#;

    #[test]
    fn test_find_first_by_tag_and_class() {
        let html = Html::parse_fragment(HTML);
        let root = html.root_element();

        let element = find_first(root, &ElementQuery::tag("p").class("h-text-bold")).unwrap();
        assert_eq!(inner_text(element).trim(), "Jan 05, 2024");
    }

    #[test]
    fn test_find_first_by_text_pattern() {
        let html = Html::parse_fragment(HTML);
        let root = html.root_element();
        let pattern = Regex::new(r"^\$\d").unwrap();

        let element = find_first(root, &ElementQuery::tag("p").text_matches(&pattern)).unwrap();
        assert_eq!(inner_text(element).trim(), "$1,234.56");
    }

    #[test]
    fn test_find_first_by_attr_pattern() {
        let html = Html::parse_fragment(HTML);
        let root = html.root_element();
        let pattern = Regex::new(r"^/orders/").unwrap();

        let element =
            find_first(root, &ElementQuery::tag("a").attr_matches("href", &pattern)).unwrap();
        assert_eq!(element.value().attr("href"), Some("/orders/112233"));
    }

    #[test]
    fn test_find_first_returns_first_match_in_document_order() {
        let html = Html::parse_fragment(HTML);
        let root = html.root_element();

        let element = find_first(root, &ElementQuery::tag("a")).unwrap();
        assert_eq!(element.value().attr("href"), Some("/orders/112233"));
    }

    #[test]
    fn test_find_first_not_found_is_none() {
        let html = Html::parse_fragment(HTML);
        let root = html.root_element();

        assert!(find_first(root, &ElementQuery::tag("table")).is_none());
        assert!(find_first(root, &ElementQuery::tag("p").class("missing")).is_none());
    }

    #[test]
    fn test_find_all_with_required_attrs() {
        let html = Html::parse_fragment(HTML);
        let root = html.root_element();

        let all_images = find_all(root, &ElementQuery::tag("img"));
        assert_eq!(all_images.len(), 2);

        let with_alt = find_all(root, &ElementQuery::tag("img").has_attr("alt").has_attr("src"));
        assert_eq!(with_alt.len(), 1);
        assert_eq!(with_alt[0].value().attr("alt"), Some("Mug"));
    }
}
