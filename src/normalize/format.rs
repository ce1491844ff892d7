use crate::text::fold;

pub const CURRENCY_SYMBOL: &str = "$";
pub const THOUSANDS_SEPARATOR: char = '.';

/// Shown when a listing has neither locality nor region
pub const UNSPECIFIED_LOCATION: &str = "Location unspecified";

/// Full day name (folded) → 3-letter label
const DAY_LABELS: [(&str, &str); 7] = [
    ("lunes", "Lun"),
    ("martes", "Mar"),
    ("miercoles", "Mié"),
    ("jueves", "Jue"),
    ("viernes", "Vie"),
    ("sabado", "Sáb"),
    ("domingo", "Dom"),
];

/// `150000` → `"$150.000"`. Zero or negative prices format as `"$0"`.
pub fn format_price(amount: i64) -> String {
    let digits = amount.max(0).to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(ch);
    }

    format!("{CURRENCY_SYMBOL}{grouped}")
}

/// Map a full day name to its abbreviation. Unknown names pass through.
pub fn abbreviate_day(day: &str) -> String {
    let key = fold(day);
    DAY_LABELS
        .iter()
        .find(|(full, _)| *full == key)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| day.to_string())
}

/// `"Medellín, Antioquia"` from whichever of locality and region are present
pub fn compose_city_label(locality: Option<&str>, region: Option<&str>) -> String {
    let parts: Vec<&str> = [locality, region]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    if parts.is_empty() {
        UNSPECIFIED_LOCATION.to_string()
    } else {
        parts.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices_get_thousands_separators() {
        assert_eq!(format_price(0), "$0");
        assert_eq!(format_price(-50), "$0");
        assert_eq!(format_price(999), "$999");
        assert_eq!(format_price(1_000), "$1.000");
        assert_eq!(format_price(150_000), "$150.000");
        assert_eq!(format_price(12_345_678), "$12.345.678");
    }

    #[test]
    fn days_are_abbreviated() {
        assert_eq!(abbreviate_day("Lunes"), "Lun");
        assert_eq!(abbreviate_day("miércoles"), "Mié");
        assert_eq!(abbreviate_day("SABADO"), "Sáb");
        assert_eq!(abbreviate_day("Festivos"), "Festivos");
    }

    #[test]
    fn city_label_joins_present_parts() {
        assert_eq!(
            compose_city_label(Some("Bogotá"), Some("Cundinamarca")),
            "Bogotá, Cundinamarca"
        );
        assert_eq!(compose_city_label(None, Some("Antioquia")), "Antioquia");
        assert_eq!(compose_city_label(Some("  "), None), UNSPECIFIED_LOCATION);
        assert_eq!(compose_city_label(None, None), UNSPECIFIED_LOCATION);
    }
}
