use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

pub const DISMISS_AFTER_MS: u32 = 5_000;

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(u64),
}

/// The visible toasts. Updated through a reducer so a dismiss timer firing
/// after later pushes removes exactly its own toast.
#[derive(PartialEq, Default)]
pub struct ToastList {
    pub items: Vec<Toast>,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: ToastAction) -> Rc<Self> {
        let mut items = self.items.clone();
        match action {
            ToastAction::Push(toast) => items.push(toast),
            ToastAction::Dismiss(id) => items.retain(|t| t.id != id),
        }
        Rc::new(ToastList { items })
    }
}

/// Handle passed down to pages and modals; any component holding one can
/// raise a toast and it disappears on its own five seconds later.
#[derive(Clone, PartialEq)]
pub struct Toaster {
    list: UseReducerHandle<ToastList>,
    next_id: Rc<RefCell<u64>>,
}

impl Toaster {
    pub fn new(list: UseReducerHandle<ToastList>, next_id: Rc<RefCell<u64>>) -> Self {
        Self { list, next_id }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.notify(ToastKind::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.notify(ToastKind::Error, text.into());
    }

    fn notify(&self, kind: ToastKind, text: String) {
        let id = {
            let mut next = self.next_id.borrow_mut();
            let id = *next;
            *next += 1;
            id
        };
        self.list.dispatch(ToastAction::Push(Toast { id, kind, text }));
        let list = self.list.clone();
        spawn_local(async move {
            TimeoutFuture::new(DISMISS_AFTER_MS).await;
            list.dispatch(ToastAction::Dismiss(id));
        });
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastHostProps {
    pub toasts: Vec<Toast>,
}

#[function_component(ToastHost)]
pub fn toast_host(props: &ToastHostProps) -> Html {
    html! {
        <div class="fixed top-4 right-4 z-50 w-80 space-y-2">
            { for props.toasts.iter().map(|toast| {
                let classes = match toast.kind {
                    ToastKind::Success => "bg-emerald-600 text-white rounded-lg shadow-lg px-4 py-3 text-sm",
                    ToastKind::Error => "bg-red-600 text-white rounded-lg shadow-lg px-4 py-3 text-sm",
                };
                html! {
                    <div key={toast.id} class={classes}>{ &toast.text }</div>
                }
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(id: u64, text: &str) -> Toast {
        Toast {
            id,
            kind: ToastKind::Success,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_push_appends_in_order() {
        let list = Rc::new(ToastList::default());
        let list = list.reduce(ToastAction::Push(toast(0, "first")));
        let list = list.reduce(ToastAction::Push(toast(1, "second")));
        let texts: Vec<&str> = list.items.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_dismiss_removes_only_the_expired_toast() {
        let list = Rc::new(ToastList::default());
        let list = list.reduce(ToastAction::Push(toast(0, "first")));
        let list = list.reduce(ToastAction::Push(toast(1, "second")));
        let list = list.reduce(ToastAction::Dismiss(0));
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].id, 1);
    }

    #[test]
    fn test_dismissing_an_unknown_id_is_a_no_op() {
        let list = Rc::new(ToastList::default());
        let list = list.reduce(ToastAction::Push(toast(0, "only")));
        let list = list.reduce(ToastAction::Dismiss(99));
        assert_eq!(list.items.len(), 1);
    }
}
