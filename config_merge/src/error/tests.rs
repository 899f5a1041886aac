//! Unit tests for error construction, inspection, and rendering.

use std::error::Error as _;

use anyhow::{Result, anyhow, ensure};
use camino::Utf8PathBuf;
use rstest::rstest;

use super::{ComposeError, MergeError, MergeErrorKind};
use crate::identity::IdentityKey;
use crate::layer::MergeProvenance;
use crate::path::Context;
use crate::value::ValueKind;

fn leaf_mismatch() -> MergeError {
    let root = Context::root();
    let outer = root.with_key("outer");
    let inner = outer.with_key("inner");
    MergeError::type_mismatch(&inner, ValueKind::String, ValueKind::Number)
}

#[rstest]
fn mismatch_renders_kinds_and_path() {
    let err = leaf_mismatch();
    assert_eq!(err.kind(), MergeErrorKind::TypeMismatch);
    assert_eq!(
        err.to_string(),
        "type mismatch at 'outer.inner': cannot merge number into string"
    );
    assert!(err.source().is_none());
}

#[rstest]
fn wrappers_expose_sources_and_root_cause() -> Result<()> {
    let root = Context::root();
    let outer = root.with_key("outer");
    let inner = outer.with_key("inner");
    let wrapped = MergeError::property(
        &outer,
        "outer",
        MergeError::property(&inner, "inner", leaf_mismatch()),
    );

    ensure!(wrapped.kind() == MergeErrorKind::PropertyMergeFailed);
    ensure!(wrapped.path().to_string() == "outer");
    let source = wrapped
        .source()
        .ok_or_else(|| anyhow!("wrapper should expose its source"))?;
    ensure!(
        source.to_string().starts_with("failed to merge object property 'inner'"),
        "unexpected source {source}"
    );
    let cause = wrapped.root_cause();
    ensure!(cause.kind() == MergeErrorKind::TypeMismatch);
    ensure!(cause.path().to_string() == "outer.inner");
    Ok(())
}

#[rstest]
fn sequence_wrapper_names_identity() -> Result<()> {
    let identity = IdentityKey::from_value(&serde_json::json!(7))?;
    let root = Context::root();
    let list = root.with_key("list");
    let element = list.with_identity(&identity);
    let err = MergeError::sequence(&element, &identity, leaf_mismatch());

    ensure!(err.kind() == MergeErrorKind::SequenceMergeFailed);
    ensure!(err.path().to_string() == "list[7]", "path {}", err.path());
    ensure!(
        err.to_string().starts_with("failed to merge sequence element 7:"),
        "unexpected message {err}"
    );
    Ok(())
}

#[rstest]
fn invalid_destination_carries_reason() {
    let err = MergeError::invalid_destination(&Context::root(), "nothing there");
    assert_eq!(err.kind(), MergeErrorKind::InvalidDestination);
    assert_eq!(err.to_string(), "invalid destination at '<root>': nothing there");
    assert!(std::ptr::eq(err.root_cause(), &err));
}

#[rstest]
#[case::with_file(
    Some(Utf8PathBuf::from("conf/app.yaml")),
    "failed to merge file layer 1 from 'conf/app.yaml': "
)]
#[case::without_file(None, "failed to merge file layer 1: ")]
fn layer_errors_name_their_origin(#[case] path: Option<Utf8PathBuf>, #[case] prefix: &str) {
    let err = ComposeError::Layer {
        index: 1,
        provenance: MergeProvenance::File,
        path,
        source: leaf_mismatch(),
    };
    let rendered = err.to_string();
    assert!(rendered.starts_with(prefix), "unexpected message {rendered}");
    assert!(err.source().is_some());
}
