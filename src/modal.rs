// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Open/edit/save lifecycle for a single record.

use std::mem;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Closed,
    Viewing,
    Editing,
    Saving,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot {action} while {from:?}")]
    Invalid { action: &'static str, from: Phase },
    #[error("cannot close while a save is in flight")]
    SaveInFlight,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModalState<T> {
    Closed,
    Viewing(T),
    Editing { original: T, draft: T },
    Saving { original: T, draft: T },
}

/// Holds one record through view, edit and save. A rejected transition
/// leaves the state exactly as it was.
#[derive(Debug, Clone, PartialEq)]
pub struct Modal<T> {
    state: ModalState<T>,
}

impl<T> Default for Modal<T> {
    fn default() -> Self {
        Modal {
            state: ModalState::Closed,
        }
    }
}

impl<T: Clone> Modal<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState<T> {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            ModalState::Closed => Phase::Closed,
            ModalState::Viewing(_) => Phase::Viewing,
            ModalState::Editing { .. } => Phase::Editing,
            ModalState::Saving { .. } => Phase::Saving,
        }
    }

    fn invalid(&self, action: &'static str) -> TransitionError {
        TransitionError::Invalid {
            action,
            from: self.phase(),
        }
    }

    pub fn open(&mut self, record: T) -> Result<(), TransitionError> {
        match self.state {
            ModalState::Closed => {
                self.state = ModalState::Viewing(record);
                Ok(())
            }
            _ => Err(self.invalid("open")),
        }
    }

    pub fn edit(&mut self) -> Result<(), TransitionError> {
        match mem::replace(&mut self.state, ModalState::Closed) {
            ModalState::Viewing(record) => {
                self.state = ModalState::Editing {
                    draft: record.clone(),
                    original: record,
                };
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.invalid("edit"))
            }
        }
    }

    pub fn draft_mut(&mut self) -> Result<&mut T, TransitionError> {
        let from = self.phase();
        match &mut self.state {
            ModalState::Editing { draft, .. } => Ok(draft),
            _ => Err(TransitionError::Invalid {
                action: "change the draft",
                from,
            }),
        }
    }

    /// Drops the draft and returns to the untouched record.
    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        match mem::replace(&mut self.state, ModalState::Closed) {
            ModalState::Editing { original, .. } => {
                self.state = ModalState::Viewing(original);
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.invalid("cancel"))
            }
        }
    }

    /// Moves to `Saving` and hands back the draft to submit.
    pub fn begin_save(&mut self) -> Result<T, TransitionError> {
        match mem::replace(&mut self.state, ModalState::Closed) {
            ModalState::Editing { original, draft } => {
                let submitted = draft.clone();
                self.state = ModalState::Saving { original, draft };
                Ok(submitted)
            }
            other => {
                self.state = other;
                Err(self.invalid("save"))
            }
        }
    }

    /// Success shows the saved record; failure returns to editing with the draft intact.
    pub fn finish_save<E>(&mut self, outcome: Result<T, E>) -> Result<Result<(), E>, TransitionError> {
        match mem::replace(&mut self.state, ModalState::Closed) {
            ModalState::Saving { original, draft } => match outcome {
                Ok(saved) => {
                    self.state = ModalState::Viewing(saved);
                    Ok(Ok(()))
                }
                Err(e) => {
                    self.state = ModalState::Editing { original, draft };
                    Ok(Err(e))
                }
            },
            other => {
                self.state = other;
                Err(self.invalid("finish saving"))
            }
        }
    }

    pub fn close(&mut self) -> Result<(), TransitionError> {
        if let ModalState::Saving { .. } = self.state {
            return Err(TransitionError::SaveInFlight);
        }
        self.state = ModalState::Closed;
        Ok(())
    }

    pub fn viewing(&self) -> Option<&T> {
        match &self.state {
            ModalState::Viewing(record) => Some(record),
            _ => None,
        }
    }
}

/// Runs one open, edit, save cycle over `record`.
///
/// On a failed save the error is returned and the caller's copy of the
/// record is the only state there is, so nothing local changes.
pub fn edit_record<T, E>(
    record: T,
    apply: impl FnOnce(&mut T),
    save: impl FnOnce(&T) -> Result<T, E>,
) -> anyhow::Result<Result<T, E>>
where
    T: Clone,
{
    let mut modal = Modal::new();
    modal.open(record)?;
    modal.edit()?;
    apply(modal.draft_mut()?);
    let draft = modal.begin_save()?;
    if let Err(e) = modal.finish_save(save(&draft))? {
        modal.cancel()?;
        modal.close()?;
        return Ok(Err(e));
    }
    let saved = modal.viewing().cloned();
    modal.close()?;
    saved
        .map(Ok)
        .ok_or_else(|| anyhow::anyhow!("saved record missing after save"))
}
