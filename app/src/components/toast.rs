//! Bottom-right notifications for the outcome of API calls.
//!
//! [`Toasts`] is provided once by the root component and looked up by each page.
//! The queue itself is plain data so its behaviour can be tested without a DOM.

use leptos::prelude::*;

/// At most this many toasts are shown; older ones are dropped first.
const MAX_VISIBLE: usize = 5;
#[cfg(feature = "hydrate")]
const DISMISS_AFTER: core::time::Duration = core::time::Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastQueue {
    next_id: u64,
    items: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, title: String, description: Option<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast {
            id,
            kind,
            title,
            description,
        });
        if self.items.len() > MAX_VISIBLE {
            let overflow = self.items.len() - MAX_VISIBLE;
            self.items.drain(..overflow);
        }
        id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|toast| toast.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// Handle to the shared toast queue.
#[derive(Debug, Clone, Copy)]
pub struct Toasts(RwSignal<ToastQueue>);

impl Toasts {
    /// Creates the queue and registers it as context for descendants.
    pub fn provide() -> Self {
        let toasts = Self(RwSignal::new(ToastQueue::default()));
        provide_context(toasts);
        toasts
    }

    /// The queue provided by an ancestor, or a fresh one when there is none.
    pub fn use_toasts() -> Self {
        use_context::<Self>().unwrap_or_else(Self::provide)
    }

    fn push(self, kind: ToastKind, title: impl Into<String>, description: Option<String>) {
        let mut id = 0;
        self.0
            .update(|queue| id = queue.push(kind, title.into(), description));

        #[cfg(feature = "hydrate")]
        set_timeout(move || self.dismiss(id), DISMISS_AFTER);
        #[cfg(not(feature = "hydrate"))]
        let _ = id;
    }

    pub fn success(self, title: impl Into<String>, description: impl Into<String>) {
        self.push(ToastKind::Success, title, Some(description.into()));
    }

    pub fn error(self, title: impl Into<String>, description: impl Into<String>) {
        self.push(ToastKind::Error, title, Some(description.into()));
    }

    pub fn dismiss(self, id: u64) {
        self.0.update(|queue| queue.dismiss(id));
    }
}

/// Renders the toast stack. Mounted once near the root.
pub fn component() -> impl IntoView {
    let toasts = Toasts::use_toasts();

    view! {
        <div class="flex fixed right-4 bottom-4 z-50 flex-col gap-2 w-80" aria-live="polite">
            <For
                each=move || toasts.0.get().items().to_vec()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let tone = match toast.kind {
                        ToastKind::Success => "border-green-500 bg-green-50",
                        ToastKind::Error => "border-red-500 bg-red-50",
                    };
                    view! {
                        <div
                            class=format!("p-3 rounded-md border-l-4 shadow cursor-pointer {tone}")
                            role="status"
                            on:click=move |_| toasts.dismiss(id)
                        >
                            <p class="font-semibold">{toast.title}</p>
                            {toast.description.map(|d| view! { <p class="text-sm text-gray-600">{d}</p> })}
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastKind::Success, "a".into(), None);
        let second = queue.push(ToastKind::Error, "b".into(), Some("why".into()));

        assert!(second > first);
        assert_eq!(queue.items().len(), 2);
        assert_eq!(queue.items()[1].description.as_deref(), Some("why"));
    }

    #[test]
    fn test_dismiss_removes_only_that_toast() {
        let mut queue = ToastQueue::default();
        let first = queue.push(ToastKind::Success, "a".into(), None);
        queue.push(ToastKind::Success, "b".into(), None);
        queue.dismiss(first);

        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].title, "b");
    }

    #[test]
    fn test_queue_keeps_most_recent() {
        let mut queue = ToastQueue::default();
        for n in 0..8 {
            queue.push(ToastKind::Error, format!("toast {n}"), None);
        }

        assert_eq!(queue.items().len(), MAX_VISIBLE);
        assert_eq!(queue.items()[0].title, "toast 3");
        assert_eq!(queue.items()[MAX_VISIBLE - 1].title, "toast 7");
    }
}
