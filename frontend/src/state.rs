use std::rc::Rc;

use yew::Reducible;

use crate::filter::{filter_incomes, toggle_category};
use crate::models::{Category, IncomeDraft, IncomeForm, IncomeRecord};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalMode {
    Closed,
    Adding,
    Editing,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

impl MutationKind {
    pub fn success_message(self) -> &'static str {
        match self {
            MutationKind::Create => "income added successfully",
            MutationKind::Update => "income updated successfully",
            MutationKind::Delete => "income deleted successfully",
        }
    }
}

/// Everything the incomes page renders from.
///
/// `displayed_incomes` is derived: every transition touching the income list,
/// the selected category or the query recomputes it.
#[derive(Clone, Debug, PartialEq)]
pub struct IncomeListState {
    pub categories: Vec<Category>,
    pub all_incomes: Vec<IncomeRecord>,
    pub displayed_incomes: Vec<IncomeRecord>,
    pub selected_category: Option<String>,
    pub search_query: String,
    pub editing: Option<IncomeDraft>,
    pub modal: ModalMode,
    /// Bumped to make the loader fetch again.
    pub reload_tick: u64,
}

impl Default for IncomeListState {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            all_incomes: Vec::new(),
            displayed_incomes: Vec::new(),
            selected_category: None,
            search_query: String::new(),
            editing: None,
            modal: ModalMode::Closed,
            reload_tick: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum IncomeAction {
    CategoriesLoaded(Vec<Category>),
    IncomesLoaded(Vec<IncomeRecord>),
    ToggleCategory(String),
    Search(String),
    OpenAdd,
    StartEdit(IncomeRecord),
    CloseModal,
    /// Also the reload command: bumps `reload_tick`.
    MutationSucceeded(MutationKind),
}

impl IncomeListState {
    fn refilter(&mut self) {
        self.displayed_incomes = filter_incomes(
            &self.all_incomes,
            self.selected_category.as_deref(),
            &self.search_query,
        );
    }

    pub fn category_name(&self, id: &str) -> Option<&str> {
        self.categories
            .iter()
            .find(|category| category.id == id)
            .map(|category| category.name.as_str())
    }

    /// Form values the modal opens with.
    pub fn modal_defaults(&self) -> IncomeForm {
        match (&self.modal, &self.editing) {
            (ModalMode::Editing, Some(draft)) => draft.form.clone(),
            _ => IncomeForm::empty(),
        }
    }

    pub fn apply(&mut self, action: IncomeAction) {
        match action {
            IncomeAction::CategoriesLoaded(categories) => {
                self.categories = categories;
            }
            IncomeAction::IncomesLoaded(incomes) => {
                self.all_incomes = incomes;
                self.refilter();
            }
            IncomeAction::ToggleCategory(id) => {
                self.selected_category = toggle_category(self.selected_category.as_deref(), &id);
                self.refilter();
            }
            IncomeAction::Search(query) => {
                self.search_query = query;
                self.refilter();
            }
            IncomeAction::OpenAdd => {
                self.editing = None;
                self.modal = ModalMode::Adding;
            }
            IncomeAction::StartEdit(record) => {
                let name = self.category_name(&record.category_id);
                let form = IncomeForm::from_record(&record, name);
                self.editing = Some(IncomeDraft {
                    id: record.id,
                    form,
                });
                self.modal = ModalMode::Editing;
            }
            IncomeAction::CloseModal => {
                self.editing = None;
                self.modal = ModalMode::Closed;
            }
            IncomeAction::MutationSucceeded(kind) => {
                self.reload_tick = self.reload_tick.wrapping_add(1);
                // Only the form that submitted is closed; the user may have moved on.
                match (kind, self.modal) {
                    (MutationKind::Create, ModalMode::Adding) => self.modal = ModalMode::Closed,
                    (MutationKind::Update, ModalMode::Editing) => {
                        self.editing = None;
                        self.modal = ModalMode::Closed;
                    }
                    _ => {}
                }
            }
        }
    }
}

impl Reducible for IncomeListState {
    type Action = IncomeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}
