use crate::dto::input::Notification;

///
/// Snapshot of the session's notification state.
///
/// Consumers receive it through a watch channel and never mutate it
/// directly; every mutation goes through the sync service's operations.
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncState {
    /// Server/fallback order, never re-sorted by this crate
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
    pub is_logged_in: bool,
    pub is_loading: bool,
}

impl SyncState {
    ///
    /// `unread_count` is derived data. It is never set independently,
    /// only recomputed from the list after a mutation.
    ///
    pub(crate) fn recompute_unread_count(&mut self) {
        self.unread_count = self
            .notifications
            .iter()
            .filter(|notification| !notification.is_read)
            .count();
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn notification(id: &str, is_read: bool) -> Notification {
        Notification {
            id: id.to_string(),
            title: "title".to_string(),
            description: "description".to_string(),
            time: "now".to_string(),
            is_read,
            icon: "heart-outline".to_string(),
        }
    }

    #[test]
    fn recompute_unread_count_counts_unread_only() {
        let mut state = SyncState {
            notifications: vec![
                notification("1", false),
                notification("2", true),
                notification("3", false),
            ],
            unread_count: 0,
            is_logged_in: true,
            is_loading: false,
        };

        state.recompute_unread_count();

        assert_eq!(state.unread_count, 2);
    }

    #[test]
    fn recompute_unread_count_empty_list() {
        let mut state = SyncState {
            notifications: vec![],
            unread_count: 7,
            is_logged_in: false,
            is_loading: false,
        };

        state.recompute_unread_count();

        assert_eq!(state.unread_count, 0);
    }
}
