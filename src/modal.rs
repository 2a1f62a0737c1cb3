use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ModalProps {
    pub title: String,
    pub on_close: Callback<()>,
    pub children: Children,
}

/// Overlay dialog; clicking the backdrop or the close button dismisses it,
/// clicks inside the panel do not.
#[function_component(Modal)]
pub fn modal(props: &ModalProps) -> Html {
    let close_from_overlay = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let close_from_button = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };
    let swallow_click = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div
            class="fixed inset-0 z-40 flex items-center justify-center bg-slate-900/50 p-4"
            onclick={close_from_overlay}
        >
            <div
                class="w-full max-w-lg rounded-2xl bg-white shadow-xl"
                onclick={swallow_click}
            >
                <div class="flex items-center justify-between border-b border-slate-200 px-6 py-4">
                    <h3 class="text-lg font-semibold text-slate-800">{ &props.title }</h3>
                    <button
                        type="button"
                        class="text-2xl leading-none text-slate-400 hover:text-slate-600"
                        onclick={close_from_button}
                    >
                        { "\u{00d7}" }
                    </button>
                </div>
                <div class="px-6 py-5">
                    { for props.children.iter() }
                </div>
            </div>
        </div>
    }
}
