use crate::api::IncomeApi;
use crate::error::ApiError;
use crate::models::IncomeForm;
use crate::state::{IncomeAction, MutationKind};
use crate::toast::{ToastAction, ToastKind};

#[derive(Clone, Debug, PartialEq)]
pub enum Mutation {
    Create(IncomeForm),
    Update { id: String, form: IncomeForm },
    Delete { id: String },
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Create(_) => MutationKind::Create,
            Mutation::Update { .. } => MutationKind::Update,
            Mutation::Delete { .. } => MutationKind::Delete,
        }
    }
}

/// What the page does once a mutation settles.
#[derive(Clone, Debug, PartialEq)]
pub struct Settled {
    pub action: Option<IncomeAction>,
    pub toast: ToastAction,
}

/// Sends one mutation. Concurrent calls are not de-duplicated.
pub async fn run<A: IncomeApi + ?Sized>(api: &A, mutation: Mutation) -> Settled {
    let kind = mutation.kind();
    let result = match &mutation {
        Mutation::Create(form) => api.add_income(form).await,
        Mutation::Update { id, form } => api.update_income(id, form).await,
        Mutation::Delete { id } => api.delete_income(id).await,
    };
    settle(kind, result)
}

pub fn settle(kind: MutationKind, result: Result<(), ApiError>) -> Settled {
    match result {
        Ok(()) => {
            tracing::info!(?kind, "income mutation succeeded");
            Settled {
                action: Some(IncomeAction::MutationSucceeded(kind)),
                toast: ToastAction::Push(ToastKind::Success, kind.success_message().to_string()),
            }
        }
        Err(err) => {
            tracing::error!(?kind, error = %err, "income mutation failed");
            Settled {
                action: None,
                toast: ToastAction::Push(ToastKind::Error, err.user_message()),
            }
        }
    }
}
