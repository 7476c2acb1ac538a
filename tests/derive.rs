//! Integration test for the Event derive macro.
#![cfg(feature = "macros")]

use mockstore::Event;

#[derive(Event, Clone, Debug)]
#[allow(dead_code)]
enum ProfileEvent {
    FetchProfile,
    ProfileLoaded(String),
    UpdateDisplayName { name: String },
    #[event(kind = "@@router/LOCATION_CHANGE")]
    LocationChange { path: String },
}

#[derive(Event, Clone, Debug)]
struct SessionExpired;

#[derive(Event, Clone, Debug)]
#[event(kind = "app/reset")]
struct ResetApp;

#[derive(Event, Clone, Debug)]
#[allow(dead_code)]
enum Wrapped<T: Clone + std::fmt::Debug + Send + Sync + 'static> {
    Value(T),
}

#[test]
fn derived_kind_unit() {
    assert_eq!(ProfileEvent::FetchProfile.kind(), "FETCH_PROFILE");
}

#[test]
fn derived_kind_tuple() {
    assert_eq!(ProfileEvent::ProfileLoaded("ada".into()).kind(), "PROFILE_LOADED");
}

#[test]
fn derived_kind_struct() {
    let event = ProfileEvent::UpdateDisplayName { name: "Ada".into() };
    assert_eq!(event.kind(), "UPDATE_DISPLAY_NAME");
}

#[test]
fn derived_kind_override() {
    let event = ProfileEvent::LocationChange { path: "/".into() };
    assert_eq!(event.kind(), "@@router/LOCATION_CHANGE");
}

#[test]
fn derived_kind_for_structs() {
    assert_eq!(SessionExpired.kind(), "SESSION_EXPIRED");
    assert_eq!(ResetApp.kind(), "app/reset");
}

#[test]
fn derived_kind_keeps_generics() {
    assert_eq!(Wrapped::Value(1u8).kind(), "VALUE");
}
