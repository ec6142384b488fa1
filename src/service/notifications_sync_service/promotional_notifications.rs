use crate::dto::input::Notification;

///
/// Fixed promotional set shown to anonymous users and used as the
/// initialization fallback when the first authenticated fetch fails.
///
pub(crate) fn promotional_notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: "promo1".to_string(),
            title: "Welcome to Lunara".to_string(),
            description: "Create an account to get updates tailored to every week of your pregnancy."
                .to_string(),
            time: "Just now".to_string(),
            is_read: false,
            icon: "heart-outline".to_string(),
        },
        Notification {
            id: "promo2".to_string(),
            title: "Track your baby's growth".to_string(),
            description: "Follow week-by-week milestones and see what to expect next.".to_string(),
            time: "1h ago".to_string(),
            is_read: false,
            icon: "calendar-outline".to_string(),
        },
        Notification {
            id: "promo3".to_string(),
            title: "Explore the health library".to_string(),
            description: "Browse trusted articles on common conditions during pregnancy."
                .to_string(),
            time: "3h ago".to_string(),
            is_read: false,
            icon: "book-outline".to_string(),
        },
        Notification {
            id: "promo4".to_string(),
            title: "Find the perfect name".to_string(),
            description: "Thousands of baby names to browse and save to your profile.".to_string(),
            time: "1d ago".to_string(),
            is_read: false,
            icon: "star-outline".to_string(),
        },
    ]
}
