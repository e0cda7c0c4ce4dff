// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use deskboard::modal::{Modal, ModalState, Phase, TransitionError, edit_record};

#[test]
fn full_cycle_ends_viewing_saved_record() {
    let mut m = Modal::new();
    assert_eq!(m.phase(), Phase::Closed);
    m.open(String::from("draft me")).unwrap();
    assert_eq!(m.phase(), Phase::Viewing);
    m.edit().unwrap();
    m.draft_mut().unwrap().push_str(" now");
    let submitted = m.begin_save().unwrap();
    assert_eq!(submitted, "draft me now");
    assert_eq!(m.phase(), Phase::Saving);
    m.finish_save::<()>(Ok(String::from("saved"))).unwrap().unwrap();
    assert_eq!(m.viewing().map(String::as_str), Some("saved"));
    m.close().unwrap();
    assert_eq!(m.phase(), Phase::Closed);
}

#[test]
fn cannot_close_while_saving() {
    let mut m = Modal::new();
    m.open(1).unwrap();
    m.edit().unwrap();
    m.begin_save().unwrap();
    assert_eq!(m.close(), Err(TransitionError::SaveInFlight));
    assert_eq!(m.phase(), Phase::Saving);
}

#[test]
fn failed_save_returns_to_editing_with_draft() {
    let mut m = Modal::new();
    m.open(1).unwrap();
    m.edit().unwrap();
    *m.draft_mut().unwrap() = 2;
    m.begin_save().unwrap();
    let outcome = m.finish_save(Err("offline")).unwrap();
    assert_eq!(outcome, Err("offline"));
    assert_eq!(
        m.state(),
        &ModalState::Editing {
            original: 1,
            draft: 2
        }
    );
    m.cancel().unwrap();
    assert_eq!(m.viewing(), Some(&1));
}

#[test]
fn invalid_transitions_leave_state_alone() {
    let mut m: Modal<i32> = Modal::new();
    assert_eq!(
        m.edit(),
        Err(TransitionError::Invalid {
            action: "edit",
            from: Phase::Closed
        })
    );
    assert!(m.begin_save().is_err());
    assert!(m.draft_mut().is_err());

    m.open(5).unwrap();
    assert!(m.open(6).is_err());
    assert!(m.begin_save().is_err());
    assert!(m.finish_save::<()>(Ok(9)).is_err());
    assert_eq!(m.viewing(), Some(&5));
}

#[test]
fn edit_record_returns_saved_value() {
    let saved = edit_record(
        String::from("a"),
        |d| d.push('b'),
        |d| Ok::<_, String>(d.to_uppercase()),
    )
    .unwrap();
    assert_eq!(saved, Ok(String::from("AB")));
}

#[test]
fn edit_record_surfaces_save_errors() {
    let outcome = edit_record(5, |d| *d += 1, |_| Err::<i32, _>("rejected")).unwrap();
    assert_eq!(outcome, Err("rejected"));
}
