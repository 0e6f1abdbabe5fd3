use anyhow::Result;

use crate::models::Listing;

/// Encode the final record set as CSV: one header row, one row per
/// listing, missing optional fields rendered as empty strings.
pub fn to_csv_bytes(listings: &[Listing]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(vec![]);
    for listing in listings {
        writer.serialize(listing)?;
    }
    Ok(writer.into_inner()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Listing {
        Listing {
            title: "Premium Car Cover".to_string(),
            price: Some("₹1,200".to_string()),
            location: Some("Bengaluru".to_string()),
            posted: Some("2 days ago".to_string()),
            link: "https://www.olx.in/item/used-cover-123456789".to_string(),
            ad_id: Some("123456789".to_string()),
        }
    }

    #[test]
    fn header_row_has_fixed_column_order() {
        let bytes = to_csv_bytes(&[sample()]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let header = text.lines().next().unwrap();
        assert_eq!(header, "title,price,location,posted,link,ad_id");
    }

    #[test]
    fn missing_optional_fields_become_empty_strings() {
        let listing = Listing {
            price: None,
            location: None,
            posted: None,
            ad_id: None,
            ..sample()
        };
        let bytes = to_csv_bytes(&[listing]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "Premium Car Cover,,,,https://www.olx.in/item/used-cover-123456789,"
        );
    }

    #[test]
    fn comma_bearing_values_are_quoted() {
        let listing = Listing {
            location: Some("Sector 62, Noida".to_string()),
            ..sample()
        };
        let bytes = to_csv_bytes(&[listing]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"Sector 62, Noida\""));
        assert!(text.contains("\"₹1,200\""));
    }
}
