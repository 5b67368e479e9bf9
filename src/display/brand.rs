//! Brand display formatting
//!
//! Formats brands for terminal output in table and detail views.

use crate::models::Brand;

/// Format a list of brands as a table
pub fn format_brand_list(brands: &[Brand]) -> String {
    if brands.is_empty() {
        return "No brands found.".to_string();
    }

    let id_width = column_width(brands.iter().map(|b| b.id.to_string().len()), 2);
    let name_width = column_width(brands.iter().map(|b| b.name.chars().count()), 4);
    let owner_width = column_width(brands.iter().map(|b| b.owner.chars().count()), 5);
    let number_width = column_width(
        brands
            .iter()
            .map(|b| b.registration_number.as_deref().unwrap_or("-").chars().count()),
        12,
    );

    let mut output = String::new();
    output.push_str(&format!(
        "{:<id_width$}  {:<name_width$}  {:<owner_width$}  {:<number_width$}  {}\n",
        "ID", "Name", "Owner", "Registration", "Status",
    ));
    output.push_str(&format!(
        "{:-<id_width$}  {:-<name_width$}  {:-<owner_width$}  {:-<number_width$}  {:-<10}\n",
        "", "", "", "", "",
    ));

    for brand in brands {
        output.push_str(&format!(
            "{:<id_width$}  {:<name_width$}  {:<owner_width$}  {:<number_width$}  {}\n",
            brand.id.to_string(),
            brand.name,
            brand.owner,
            brand.registration_number.as_deref().unwrap_or("-"),
            brand.status,
        ));
    }

    output.push_str(&format!("\n{} brand(s)\n", brands.len()));
    output
}

/// Format a single brand's details
pub fn format_brand_details(brand: &Brand) -> String {
    let mut output = String::new();

    output.push_str(&format!("Brand: {}\n", brand.name));
    output.push_str(&format!("  ID:                  {}\n", brand.id));
    output.push_str(&format!("  Owner:               {}\n", brand.owner));
    output.push_str(&format!(
        "  Registration Number: {}\n",
        brand.registration_number.as_deref().unwrap_or("-")
    ));
    output.push_str(&format!("  Status:              {}\n", brand.status));
    output.push_str(&format!("  Created By:          {}\n", brand.created_by));

    if let Some(description) = &brand.description {
        output.push('\n');
        output.push_str(&format!("  {}\n", description));
    }

    output
}

pub(crate) fn column_width(lengths: impl Iterator<Item = usize>, min: usize) -> usize {
    lengths.max().unwrap_or(min).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BrandId, NewBrand, UserId};

    fn acme() -> Brand {
        Brand::from_new(
            BrandId::new(1),
            NewBrand::new("Acme", "Jane", UserId::new(1))
                .with_registration_number("RN-1")
                .with_description("Rockets and anvils"),
        )
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_brand_list(&[]), "No brands found.");
    }

    #[test]
    fn test_list_contains_rows() {
        let output = format_brand_list(&[acme()]);
        assert!(output.starts_with("ID"));
        assert!(output.contains("brd-1"));
        assert!(output.contains("RN-1"));
        assert!(output.contains("PENDING"));
        assert!(output.contains("1 brand(s)"));
    }

    #[test]
    fn test_details() {
        let output = format_brand_details(&acme());
        assert!(output.contains("Brand: Acme"));
        assert!(output.contains("Created By:          usr-1"));
        assert!(output.contains("Rockets and anvils"));
    }
}
