//! Architecture contract tests.

mod support;

use support::architecture::{
    find_definitions_in_mod_files, find_lines_containing, find_unsorted_crate_imports,
};

#[test]
fn domain_has_no_framework_or_outer_layer_imports() {
    let hits = find_lines_containing(
        "src/domain",
        &[
            "crate::adapter",
            "crate::infrastructure",
            "crate::application",
            "crate::port",
            "tokio::",
            "reqwest::",
        ],
    );

    assert!(
        hits.is_empty(),
        "found forbidden imports in domain layer: {hits:#?}"
    );
}

#[test]
fn ports_depend_only_on_domain() {
    let hits = find_lines_containing(
        "src/port",
        &["crate::adapter", "crate::infrastructure", "crate::application", "reqwest::"],
    );

    assert!(hits.is_empty(), "found outer-layer imports in ports: {hits:#?}");
}

#[test]
fn application_has_no_adapter_imports() {
    let hits = find_lines_containing(
        "src/application",
        &["crate::adapter", "crate::infrastructure", "reqwest::"],
    );

    assert!(
        hits.is_empty(),
        "found adapter imports in application layer: {hits:#?}"
    );
}

#[test]
fn cli_has_no_direct_infrastructure_imports() {
    let hits = find_lines_containing(
        "src/adapter/inbound/cli",
        &["use crate::infrastructure", "crate::infrastructure::"],
    );

    assert!(
        hits.is_empty(),
        "found direct infrastructure imports in inbound CLI adapters: {hits:#?}"
    );
}

#[test]
fn outbound_adapters_do_not_reach_into_application() {
    let hits = find_lines_containing("src/adapter/outbound", &["crate::application"]);

    assert!(
        hits.is_empty(),
        "found application imports in outbound adapters: {hits:#?}"
    );
}

#[test]
fn mod_rs_is_export_only() {
    let violations = find_definitions_in_mod_files("src");
    assert!(
        violations.is_empty(),
        "found definitions in mod.rs files: {violations:#?}"
    );
}

#[test]
fn crate_imports_are_sorted() {
    let violations = find_unsorted_crate_imports("src");
    assert!(
        violations.is_empty(),
        "found out-of-order crate imports: {violations:#?}"
    );
}
