use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::models::{Category, IncomeForm};

#[derive(Properties, PartialEq)]
pub struct IncomeModalProps {
    pub open: bool,
    pub edit_mode: bool,
    pub defaults: IncomeForm,
    pub categories: Vec<Category>,
    pub currency_symbol: String,
    pub on_close: Callback<()>,
    pub on_submit: Callback<IncomeForm>,
}

#[function_component(IncomeModal)]
pub fn income_modal(props: &IncomeModalProps) -> Html {
    let form = use_state(|| props.defaults.clone());

    {
        let form = form.clone();
        use_effect_with_deps(
            move |(_, defaults)| {
                form.set(defaults.clone());
                || ()
            },
            (props.open, props.defaults.clone()),
        );
    }

    if !props.open {
        return html! {};
    }

    let on_submit = {
        let form = form.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit((*form).clone());
        })
    };

    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let text_input = |update: fn(&mut IncomeForm, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            update(&mut next, input.value());
            form.set(next);
        })
    };

    let on_description = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlTextAreaElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.description = input.value();
            form.set(next);
        })
    };

    let on_category = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.category = input.value();
            form.set(next);
        })
    };

    let title = if props.edit_mode { "Update Income" } else { "Add Income" };
    let field_class = "w-full bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[13px] text-[#173E63] border-none";

    html! {
        <div class="fixed inset-0 bg-black/40 flex items-center justify-center z-40">
            <form class="w-full max-w-md bg-white rounded-2xl shadow-lg p-6 space-y-3" onsubmit={on_submit}>
                <div class="flex items-center justify-between">
                    <h3 class="text-lg font-bold text-[#173E63]">{ title }</h3>
                    <button type="button" class="text-slate-400 hover:text-slate-700" onclick={on_close.clone()}>{"✕"}</button>
                </div>
                <div class="space-y-1">
                    <label class="text-[12px] font-bold text-muted-foreground">{"Title"}</label>
                    <input type="text" class={field_class} value={form.title.clone()}
                        oninput={text_input(|f, v| f.title = v)} />
                </div>
                <div class="space-y-1">
                    <label class="text-[12px] font-bold text-muted-foreground">{"Description"}</label>
                    <textarea class={field_class} value={form.description.clone()} oninput={on_description} />
                </div>
                <div class="grid grid-cols-2 gap-3">
                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-muted-foreground">{ format!("Amount ({})", props.currency_symbol) }</label>
                        <input type="number" step="0.01" class={field_class} value={form.amount.clone()}
                            oninput={text_input(|f, v| f.amount = v)} />
                    </div>
                    <div class="space-y-1">
                        <label class="text-[12px] font-bold text-muted-foreground">{"Date"}</label>
                        <input type="date" class={field_class} value={form.date.clone()}
                            oninput={text_input(|f, v| f.date = v)} />
                    </div>
                </div>
                <div class="space-y-1">
                    <label class="text-[12px] font-bold text-muted-foreground">{"Category"}</label>
                    <select class={field_class} onchange={on_category}>
                        <option value="" selected={form.category.is_empty()}>{"Select a category"}</option>
                        { for props.categories.iter().map(|category| html! {
                            <option value={category.name.clone()} selected={category.name == form.category}>
                                { category.name.clone() }
                            </option>
                        }) }
                    </select>
                </div>
                <div class="flex gap-3 pt-2">
                    <button type="submit" class="flex-1 bg-[#173E63] text-white py-2 rounded-[10px] text-[12px] font-bold">
                        { if props.edit_mode { "Save Changes" } else { "Add Income" } }
                    </button>
                    <button type="button" onclick={on_close} class="flex-1 bg-[#B2CBDE] text-[#173E63] py-2 rounded-[10px] text-[12px] font-bold">{"Cancel"}</button>
                </div>
            </form>
        </div>
    }
}
