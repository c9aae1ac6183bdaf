//! In-memory integration tests for the invitation and signup flow.

use rstest::rstest;
use taskboard::directory::{
    domain::EmployeeId,
    services::{RegistrationError, SignupRequest},
};

use super::helpers::{Backend, backend, registered_user};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invite_then_signup_yields_registered_user(backend: Backend) -> Result<(), eyre::Report> {
    let invited = backend
        .registration
        .invite("Ada.Lovelace@Example.com")
        .await
        .expect("invitation should succeed");

    eyre::ensure!(!invited.is_registered(), "invited user is provisional");
    eyre::ensure!(
        backend
            .registration
            .joining_id_exists(invited.joining_id().as_str())
            .await
            .expect("lookup should succeed"),
        "joining ID resolves while the invitation is open"
    );

    let registered = backend
        .registration
        .complete_signup(SignupRequest::new(
            invited.joining_id().as_str(),
            "Ada Lovelace",
            "555-0100",
        ))
        .await
        .expect("signup should succeed");

    let registration = registered
        .registration()
        .ok_or_else(|| eyre::eyre!("expected a completed registration"))?;
    eyre::ensure!(
        registration.employee_id().as_str() == "Ada-teams-150",
        "employee ID derives from the first name segment"
    );
    eyre::ensure!(
        registered.email().as_str() == "ada.lovelace@example.com",
        "email is normalized on invitation"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_invitation_returns_the_existing_joining_id(backend: Backend) {
    let first = backend
        .registration
        .invite("ada@example.com")
        .await
        .expect("first invitation should succeed");

    let result = backend.registration.invite("Ada@Example.com").await;

    let Err(RegistrationError::EmailAlreadyInvited { joining_id, .. }) = result else {
        panic!("expected EmailAlreadyInvited");
    };
    assert_eq!(&joining_id, first.joining_id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_grant_is_visible_through_lookup(backend: Backend) {
    let user = registered_user(&backend, "grace@example.com", "Grace Hopper").await;
    assert!(!user.is_admin());

    let employee_id = EmployeeId::new("Grace-teams-150").expect("valid employee id");
    backend
        .registration
        .make_admin(&employee_id)
        .await
        .expect("admin grant should succeed");

    let fetched = backend
        .registration
        .find_by_employee_id(&employee_id)
        .await
        .expect("lookup should succeed")
        .expect("user exists");
    assert!(fetched.is_admin());
    assert_eq!(fetched.id(), user.id());
}
