use enstratus::{ApiContext, ApiKey, DetailLevel};

#[test]
#[ignore] // Run with: cargo test --test integration_tests -- --ignored
fn test_list_api_keys() {
    let ctx = ApiContext::from_env().expect("ES_ACCESS_KEY and ES_SECRET_KEY must be set");

    let keys = ApiKey::all(&ctx, DetailLevel::Basic, None).expect("failed to list API keys");

    println!("List test passed: {} keys visible", keys.len());
}

#[test]
#[ignore]
fn test_load_own_key() {
    let ctx = ApiContext::from_env().expect("ES_ACCESS_KEY and ES_SECRET_KEY must be set");
    let access_key = std::env::var("ES_ACCESS_KEY").expect("ES_ACCESS_KEY must be set");

    let mut key = ApiKey::with_access_key(ctx, access_key);

    let state = key.state().expect("failed to read key state");
    match state.value() {
        Some(state) => println!("Load test passed: key state is {}", state),
        None => panic!("remote error: {:?}", state.last_error()),
    }
}

#[test]
#[ignore]
fn test_extended_details() {
    let ctx = ApiContext::from_env().expect("ES_ACCESS_KEY and ES_SECRET_KEY must be set");
    let access_key = std::env::var("ES_ACCESS_KEY").expect("ES_ACCESS_KEY must be set");

    let mut key = ApiKey::with_access_key(ctx, access_key);
    key.set_request_details(DetailLevel::Extended);

    let name = key
        .name()
        .expect("failed to read key name")
        .value()
        .cloned();
    let user = key
        .user()
        .expect("failed to read key user")
        .value()
        .cloned();

    println!("Extended details test passed: name={:?}, user={:?}", name, user);
}

#[test]
#[ignore]
fn test_unknown_key_reports_error() {
    let ctx = ApiContext::from_env().expect("ES_ACCESS_KEY and ES_SECRET_KEY must be set");

    let mut key = ApiKey::with_access_key(ctx, "THIS-KEY-DOES-NOT-EXIST");

    let state = key.state().expect("read should surface the remote error");
    assert!(
        state.last_error().is_some(),
        "expected a remote error for an unknown key, got {:?}",
        state.value()
    );

    println!("Unknown key test passed: {:?}", state.last_error());
}
