use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

const TOAST_LIFETIME_MS: u32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ToastAction {
    Push(ToastKind, String),
    Dismiss(u64),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    pub toasts: Vec<Toast>,
    next_id: u64,
}

impl Reducible for ToastQueue {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            ToastAction::Push(kind, message) => {
                next.toasts.push(Toast {
                    id: next.next_id,
                    kind,
                    message,
                });
                next.next_id += 1;
            }
            ToastAction::Dismiss(id) => next.toasts.retain(|toast| toast.id != id),
        }
        Rc::new(next)
    }
}

#[derive(Properties, PartialEq)]
pub struct ToasterProps {
    pub queue: UseReducerHandle<ToastQueue>,
}

#[function_component(Toaster)]
pub fn toaster(props: &ToasterProps) -> Html {
    let on_dismiss = {
        let queue = props.queue.clone();
        Callback::from(move |id: u64| queue.dispatch(ToastAction::Dismiss(id)))
    };

    html! {
        <div class="fixed top-4 left-1/2 -translate-x-1/2 z-50 flex flex-col items-center gap-2">
            { for props.queue.toasts.iter().map(|toast| html! {
                <ToastItem key={toast.id} toast={toast.clone()} on_dismiss={on_dismiss.clone()} />
            }) }
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct ToastItemProps {
    toast: Toast,
    on_dismiss: Callback<u64>,
}

#[function_component(ToastItem)]
fn toast_item(props: &ToastItemProps) -> Html {
    {
        let id = props.toast.id;
        let on_dismiss = props.on_dismiss.clone();
        use_effect_with_deps(
            move |_| {
                let timeout = Timeout::new(TOAST_LIFETIME_MS, move || on_dismiss.emit(id));
                move || drop(timeout)
            },
            id,
        );
    }

    let (class_name, mark) = match props.toast.kind {
        ToastKind::Success => ("border-green-500 text-green-700", "✓"),
        ToastKind::Error => ("border-red-500 text-red-600", "✕"),
    };
    let onclick = {
        let id = props.toast.id;
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(id))
    };

    html! {
        <div {onclick} class={classes!("bg-white", "border-l-4", "rounded-lg", "shadow-md", "px-4", "py-2", "text-sm", "cursor-pointer", class_name)}>
            <span class="font-bold mr-2">{ mark }</span>
            { props.toast.message.clone() }
        </div>
    }
}
