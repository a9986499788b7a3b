//! Notification category rows.

use crate::ui::viewmodel::NotificationRowViewModel;
use serde::{Deserialize, Serialize};

/// One category in the notifications sheet (orders, messages, ...).
///
/// `color` is a utility colour token such as `text-green-500`; its second
/// dash-separated segment names the base colour used for the icon tint and
/// the count badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationCategory {
    pub title: String,
    pub message: String,
    pub count: u32,
    pub color: String,
}

impl NotificationCategory {
    /// ```
    /// use reelfeed::shell::NotificationCategory;
    ///
    /// let category = NotificationCategory {
    ///     title: "Orders".into(),
    ///     message: "Shipped".into(),
    ///     count: 0,
    ///     color: "text-green-500".into(),
    /// };
    /// assert_eq!(category.base_color(), Some("green"));
    /// ```
    #[must_use]
    pub fn base_color(&self) -> Option<&str> {
        self.color.split('-').nth(1)
    }

    #[must_use]
    pub fn compute_viewmodel(&self) -> NotificationRowViewModel {
        NotificationRowViewModel {
            title: self.title.clone(),
            message: self.message.clone(),
            badge: (self.count > 0).then_some(self.count),
            base_color: self.base_color().map(str::to_string),
        }
    }

    /// Categories the demo host shows.
    #[must_use]
    pub fn samples() -> Vec<Self> {
        let category = |title: &str, message: &str, count, color: &str| Self {
            title: title.to_string(),
            message: message.to_string(),
            count,
            color: color.to_string(),
        };

        vec![
            category("Sifarişlər", "Sifarişiniz yola düşdü", 2, "text-green-500"),
            category("Mesajlar", "Satıcı sualınıza cavab verdi", 1, "text-blue-500"),
            category("Kampaniyalar", "Yeni endirimlər", 0, "text-orange-500"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(count: u32, color: &str) -> NotificationCategory {
        NotificationCategory {
            title: "Mesajlar".to_string(),
            message: "Yeni mesaj".to_string(),
            count,
            color: color.to_string(),
        }
    }

    #[test]
    fn badge_only_for_positive_counts() {
        assert_eq!(category(0, "text-blue-500").compute_viewmodel().badge, None);
        assert_eq!(category(4, "text-blue-500").compute_viewmodel().badge, Some(4));
    }

    #[test]
    fn base_color_is_second_segment() {
        assert_eq!(category(1, "bg-purple-600").compute_viewmodel().base_color.as_deref(), Some("purple"));
        assert_eq!(category(1, "plain").base_color(), None);
    }
}
