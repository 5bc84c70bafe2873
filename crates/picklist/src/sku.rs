use stockflow_core::StyleNumber;

const SKU_DELIMITER: char = '-';

/// A manifest SKU split into its `<styleNumber>-<colorCode>-<size>` parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSku {
    pub style_number: StyleNumber,
    pub color_code: String,
    pub size: String,
}

/// Parse a composite SKU.
///
/// `None` when segment 0 is not a positive integer or segment 2 is empty;
/// such rows never take part in reconciliation.
pub fn parse_sku(raw: &str) -> Option<ParsedSku> {
    let mut parts = raw.split(SKU_DELIMITER);

    let style_number = parts.next()?.parse::<StyleNumber>().ok()?;
    let color_code = parts.next().unwrap_or_default().trim().to_string();
    let size = parts.next().unwrap_or_default().trim();
    if size.is_empty() {
        return None;
    }

    Some(ParsedSku {
        style_number,
        color_code,
        size: size.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_style_color_and_size() {
        let sku = parse_sku("10234-BLK-M").unwrap();
        assert_eq!(sku.style_number.get(), 10234);
        assert_eq!(sku.color_code, "BLK");
        assert_eq!(sku.size, "M");
    }

    #[test]
    fn rejects_missing_style_or_size() {
        assert_eq!(parse_sku("B-SKU"), None);
        assert_eq!(parse_sku("0-BLK-M"), None);
        assert_eq!(parse_sku("10234-BLK"), None);
        assert_eq!(parse_sku("10234-BLK-"), None);
        assert_eq!(parse_sku(""), None);
    }

    #[test]
    fn extra_segments_after_size_are_ignored() {
        let sku = parse_sku("10234-NVY-2XL-OLD").unwrap();
        assert_eq!(sku.size, "2XL");
    }
}
