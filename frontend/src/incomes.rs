use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::api::HttpIncomeApi;
use crate::config::{ApiConfig, AppSettings};
use crate::export::export_incomes;
use crate::layout::{icon_download, icon_pencil, icon_plus, icon_trash, page_shell};
use crate::loader::{load_categories, load_incomes};
use crate::modal::IncomeModal;
use crate::models::{display_date, format_currency, timestamp_label, IncomeForm};
use crate::mutations::{self, Mutation};
use crate::state::{IncomeAction, IncomeListState, ModalMode};
use crate::toast::{ToastAction, ToastKind, ToastQueue, Toaster};

#[function_component(IncomesPage)]
pub fn incomes_page() -> Html {
    let settings = use_context::<UseStateHandle<AppSettings>>();
    let currency_symbol = settings
        .as_ref()
        .map(|s| s.currency_symbol.clone())
        .unwrap_or_else(|| AppSettings::default().currency_symbol);

    let api = use_memo(|_| HttpIncomeApi::new(ApiConfig::from_env()), ());
    let state = use_reducer(IncomeListState::default);
    let toasts = use_reducer(ToastQueue::default);

    {
        let api = api.clone();
        let dispatcher = state.dispatcher();
        use_effect_with_deps(
            move |tick| {
                tracing::debug!(tick = *tick, "loading incomes page data");
                {
                    let api = api.clone();
                    let dispatcher = dispatcher.clone();
                    spawn_local(async move {
                        if let Some(categories) = load_categories(&*api).await {
                            dispatcher.dispatch(IncomeAction::CategoriesLoaded(categories));
                        }
                    });
                }
                spawn_local(async move {
                    if let Some(incomes) = load_incomes(&*api).await {
                        dispatcher.dispatch(IncomeAction::IncomesLoaded(incomes));
                    }
                });
                || ()
            },
            state.reload_tick,
        );
    }

    let mutate = {
        let api = api.clone();
        let dispatcher = state.dispatcher();
        let toasts = toasts.dispatcher();
        Callback::from(move |mutation: Mutation| {
            let api: Rc<HttpIncomeApi> = api.clone();
            let dispatcher = dispatcher.clone();
            let toasts = toasts.clone();
            spawn_local(async move {
                let settled = mutations::run(&*api, mutation).await;
                if let Some(action) = settled.action {
                    dispatcher.dispatch(action);
                }
                toasts.dispatch(settled.toast);
            });
        })
    };

    let on_submit = {
        let editing = state.editing.clone();
        let mutate = mutate.clone();
        Callback::from(move |form: IncomeForm| {
            let mutation = match &editing {
                Some(draft) => Mutation::Update {
                    id: draft.id.clone(),
                    form,
                },
                None => Mutation::Create(form),
            };
            mutate.emit(mutation);
        })
    };

    let on_close = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(IncomeAction::CloseModal))
    };

    let on_open_add = {
        let dispatcher = state.dispatcher();
        Callback::from(move |_: MouseEvent| dispatcher.dispatch(IncomeAction::OpenAdd))
    };

    let on_search = {
        let dispatcher = state.dispatcher();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(IncomeAction::Search(input.value()));
        })
    };

    let on_export = {
        let incomes = state.all_incomes.clone();
        let toasts = toasts.dispatcher();
        Callback::from(move |_: MouseEvent| {
            if let Err(err) = export_incomes(&incomes) {
                tracing::error!(error = %err, "export failed");
                toasts.dispatch(ToastAction::Push(ToastKind::Error, err.to_string()));
            }
        })
    };

    let category_filters = if state.categories.is_empty() {
        html! { <p class="text-sm text-muted-foreground">{"No categories found"}</p> }
    } else {
        html! {
            <div class="flex flex-wrap gap-2">
                { for state.categories.iter().map(|category| {
                    let active = state.selected_category.as_deref() == Some(category.id.as_str());
                    let class_name = if active {
                        "px-4 py-2 rounded-[10px] text-[12px] font-bold bg-black text-white border border-black"
                    } else {
                        "px-4 py-2 rounded-[10px] text-[12px] font-bold bg-white text-black border border-border"
                    };
                    let onclick = {
                        let dispatcher = state.dispatcher();
                        let id = category.id.clone();
                        Callback::from(move |_| dispatcher.dispatch(IncomeAction::ToggleCategory(id.clone())))
                    };
                    html! {
                        <button type="button" key={category.id.clone()} class={class_name} {onclick}>
                            { category.name.clone() }
                        </button>
                    }
                }) }
            </div>
        }
    };

    let income_list = if state.displayed_incomes.is_empty() {
        html! { <p class="px-5 py-6 text-center text-muted-foreground">{"No Incomes"}</p> }
    } else {
        html! {
            <div class="divide-y divide-border">
                { for state.displayed_incomes.iter().map(|income| {
                    let on_edit = {
                        let dispatcher = state.dispatcher();
                        let income = income.clone();
                        Callback::from(move |_| dispatcher.dispatch(IncomeAction::StartEdit(income.clone())))
                    };
                    let on_delete = {
                        let mutate = mutate.clone();
                        let id = income.id.clone();
                        Callback::from(move |_| mutate.emit(Mutation::Delete { id: id.clone() }))
                    };
                    html! {
                        <div key={income.id.clone()} class="p-5 space-y-2 hover:bg-muted/40 transition-colors">
                            <div class="flex items-center justify-between">
                                <h3 class="font-bold text-foreground">{ income.title.clone() }</h3>
                                <h3 class="font-semibold text-green-600">{ format_currency(income.amount, &currency_symbol) }</h3>
                            </div>
                            <p class="text-sm text-muted-foreground">{ income.description.clone() }</p>
                            <div class="flex items-center justify-between text-xs text-muted-foreground">
                                <span>{ format!("Date: {}", display_date(&income.date)) }</span>
                                <span>{ timestamp_label(income) }</span>
                            </div>
                            <div class="flex gap-2">
                                <button onclick={on_edit} class="flex items-center gap-1 bg-[#B2CBDE] text-[#173E63] px-3 py-1 rounded-[10px] text-[11px] font-bold">
                                    { icon_pencil() }{"Edit"}
                                </button>
                                <button onclick={on_delete} class="flex items-center gap-1 bg-red-100 text-red-600 px-3 py-1 rounded-[10px] text-[11px] font-bold">
                                    {"Delete"}{ icon_trash() }
                                </button>
                            </div>
                        </div>
                    }
                }) }
            </div>
        }
    };

    let actions = html! {
        <div class="flex gap-3">
            <button onclick={on_open_add} class="flex items-center gap-2 bg-[#173E63] text-white px-4 py-2 rounded-[10px] text-[12px] font-bold">
                { icon_plus() }{"Add Income"}
            </button>
            <button onclick={on_export} class="flex items-center gap-2 bg-[#B2CBDE] text-[#173E63] px-4 py-2 rounded-[10px] text-[12px] font-bold">
                { icon_download() }{"Export Incomes"}
            </button>
        </div>
    };

    html! {
        <>
            <Toaster queue={toasts.clone()} />
            { page_shell(
                "Incomes",
                actions,
                html! {
                    <>
                        <div class="bg-white p-5 rounded-[10px] shadow-sm border border-white/50 space-y-3">
                            <h4 class="text-[#1D617A] font-bold text-[15px] tracking-wider">{"Categories"}</h4>
                            { category_filters }
                        </div>
                        <div class="bg-white rounded-[10px] shadow-sm border border-white/50 overflow-hidden">
                            <div class="p-5 border-b border-border flex items-center justify-between gap-4">
                                <h3 class="font-bold text-lg text-foreground">{"Incomes"}</h3>
                                <input
                                    type="text"
                                    placeholder="Search incomes..."
                                    value={state.search_query.clone()}
                                    oninput={on_search}
                                    class="w-64 bg-[#f1f4f9] rounded-[10px] px-3 py-2 text-[12px] text-[#173E63] border-none"
                                />
                            </div>
                            { income_list }
                        </div>
                    </>
                }
            ) }
            <IncomeModal
                open={state.modal != ModalMode::Closed}
                edit_mode={state.modal == ModalMode::Editing}
                defaults={state.modal_defaults()}
                categories={state.categories.clone()}
                currency_symbol={currency_symbol.clone()}
                on_close={on_close}
                on_submit={on_submit}
            />
        </>
    }
}
