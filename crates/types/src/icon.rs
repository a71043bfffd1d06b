use serde::Serialize;

/// Known icon identifiers, resolved from the free-form names stored on menu
/// records. Anything unrecognised becomes [`Icon::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Icon {
    Dashboard,
    Truck,
    Users,
    Building,
    CreditCard,
    Bell,
    Settings,
    Map,
    Folder,
    Unknown,
}

impl Icon {
    pub fn from_name(name: &str) -> Self {
        let normalized = name.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "dashboard" | "home" | "speed" => Self::Dashboard,
            "truck" | "tow" | "local_shipping" | "towing" => Self::Truck,
            "users" | "people" | "person" | "group" => Self::Users,
            "building" | "business" | "company" | "companies" | "account_balance" => Self::Building,
            "credit_card" | "payment" | "payments" | "card" => Self::CreditCard,
            "bell" | "notifications" | "notification" => Self::Bell,
            "settings" | "gear" | "cog" | "admin" => Self::Settings,
            "map" | "place" | "location" => Self::Map,
            "folder" | "menu" => Self::Folder,
            _ => Self::Unknown,
        }
    }

    /// Terminal-safe glyph for this icon.
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Dashboard => "▦",
            Self::Truck => "⛟",
            Self::Users => "☺",
            Self::Building => "▥",
            Self::CreditCard => "▭",
            Self::Bell => "♪",
            Self::Settings => "⚙",
            Self::Map => "⌖",
            Self::Folder => "▸",
            Self::Unknown => "•",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Icon;

    #[test]
    fn resolves_aliases_and_falls_back() {
        assert_eq!(Icon::from_name("local_shipping"), Icon::Truck);
        assert_eq!(Icon::from_name("Credit-Card"), Icon::CreditCard);
        assert_eq!(Icon::from_name("no-such-icon"), Icon::Unknown);
        assert_eq!(Icon::from_name(""), Icon::Unknown);
    }
}
