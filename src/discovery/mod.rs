//! Model-graph discovery.
//!
//! A host model describes its members through [`ModelGraph`], in declaration
//! order. [`find_validation_states`] walks that description and collects the
//! validation states attached to properties and, if asked, to sub-models.
//!
//! Classification follows the member's current value: an observable holding
//! a sub-model is a sub-model, an observable holding nothing is a plain
//! property. The state collected for a member is always the one attached to
//! the member itself.

use crate::reactive::Observable;
use crate::state::{get_validation_state, Attachable, ValidationState};
use std::fmt;
use std::rc::Rc;

/// A host model that exposes its members for discovery.
pub trait ModelGraph {
    /// Members in declaration order.
    fn members(&self) -> Vec<Member>;
}

/// One member of a model, as seen by discovery.
#[derive(Clone)]
pub enum Member {
    /// No value; skipped.
    Absent,
    /// A function-valued member; skipped.
    Callable,
    /// A leaf value and the validation state attached to it, if any.
    Scalar(Option<ValidationState>),
    /// A nested model or collection.
    Composite {
        state: Option<ValidationState>,
        model: Rc<dyn ModelGraph>,
    },
}

impl Member {
    /// An observable, computed or other attachable leaf.
    pub fn property(target: &(impl Attachable + ?Sized)) -> Self {
        Member::Scalar(get_validation_state(target))
    }

    /// A sub-model held directly.
    pub fn model<M>(model: &Rc<M>) -> Self
    where
        M: ModelGraph + Attachable + 'static,
    {
        Member::Composite {
            state: get_validation_state(model),
            model: Rc::clone(model) as Rc<dyn ModelGraph>,
        }
    }

    /// An optional sub-model; `None` is skipped.
    pub fn optional_model<M>(model: Option<&Rc<M>>) -> Self
    where
        M: ModelGraph + Attachable + 'static,
    {
        model.map_or(Member::Absent, Member::model)
    }

    /// An observable holding an optional sub-model.
    ///
    /// The collected state is the observable's own. While the observable
    /// holds nothing it is treated as a plain property.
    pub fn observed_model<M>(cell: &Observable<Option<Rc<M>>>) -> Self
    where
        M: ModelGraph + 'static,
    {
        let state = get_validation_state(cell);
        match cell.peek() {
            Some(model) => Member::Composite {
                state,
                model: model as Rc<dyn ModelGraph>,
            },
            None => Member::Scalar(state),
        }
    }

    /// A collection of sub-models held directly.
    pub fn collection<M>(items: &[Rc<M>]) -> Self
    where
        M: ModelGraph + Attachable + 'static,
    {
        Member::Composite {
            state: None,
            model: Rc::new(items.to_vec()),
        }
    }

    /// An observable collection of sub-models, classified by its current items.
    pub fn observed_collection<M>(cell: &Observable<Vec<Rc<M>>>) -> Self
    where
        M: ModelGraph + Attachable + 'static,
    {
        Member::Composite {
            state: get_validation_state(cell),
            model: Rc::new(cell.peek()),
        }
    }

    /// Any other nested structure.
    pub fn composite(state: Option<ValidationState>, model: Rc<dyn ModelGraph>) -> Self {
        Member::Composite { state, model }
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Member::Absent => f.write_str("Absent"),
            Member::Callable => f.write_str("Callable"),
            Member::Scalar(state) => f.debug_tuple("Scalar").field(state).finish(),
            Member::Composite { state, .. } => f
                .debug_struct("Composite")
                .field("state", state)
                .finish_non_exhaustive(),
        }
    }
}

impl<M> ModelGraph for Vec<Rc<M>>
where
    M: ModelGraph + Attachable + 'static,
{
    fn members(&self) -> Vec<Member> {
        self.iter().map(Member::model).collect()
    }
}

/// Which states a discovery pass collects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Discovery {
    /// Properties of the model itself.
    MyProperties,
    /// Properties of the model and of every descendant.
    AllProperties,
    /// Properties and sub-model states of the model itself.
    MyPropertiesAndSubModels,
    /// Properties and sub-model states, recursively.
    All,
}

impl Discovery {
    pub fn include_sub_models(self) -> bool {
        matches!(self, Discovery::MyPropertiesAndSubModels | Discovery::All)
    }

    pub fn recurse(self) -> bool {
        matches!(self, Discovery::AllProperties | Discovery::All)
    }
}

/// Collect validation states from `model`.
///
/// Sub-model states are collected only with `include_sub_models`;
/// sub-models are walked only with `recurse`. Results are in declaration
/// order, depth first.
pub fn find_validation_states(
    model: &dyn ModelGraph,
    include_sub_models: bool,
    recurse: bool,
) -> Vec<ValidationState> {
    let mut found = Vec::new();
    collect(model, include_sub_models, recurse, &mut found);
    found
}

fn collect(
    model: &dyn ModelGraph,
    include_sub_models: bool,
    recurse: bool,
    found: &mut Vec<ValidationState>,
) {
    for member in model.members() {
        match member {
            Member::Absent | Member::Callable => {}
            Member::Scalar(state) => found.extend(state),
            Member::Composite { state, model } => {
                if include_sub_models {
                    found.extend(state);
                }
                if recurse {
                    collect(model.as_ref(), include_sub_models, true, found);
                }
            }
        }
    }
}
