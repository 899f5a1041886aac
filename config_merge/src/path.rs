//! Locations inside a merge, used to qualify errors.
//!
//! While recursing, the merger threads a [`Context`]: a chain of frames that
//! borrow their parent, so extending the path for one child never disturbs
//! the path seen by its siblings and costs no allocation. A [`MergePath`] is
//! only materialised when an error is raised.

use std::fmt;

use crate::identity::IdentityKey;

/// One step from the merge root towards a node.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum PathSegment {
    /// A mapping key.
    Key(String),
    /// A sequence element correlated by its identity field.
    Identity(IdentityKey),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Identity(identity) => write!(f, "[{identity}]"),
        }
    }
}

/// Ordered location of a node relative to the merge root.
///
/// Rendered as a dotted path with identities in brackets, for example
/// `servers["web"].port`. The root renders as `<root>`.
///
/// # Examples
///
/// ```rust
/// use config_merge::merge;
/// use serde_json::json;
///
/// let mut dest = json!({"a": {"b": "x"}});
/// let err = merge(&mut dest, json!({"a": {"b": 42}})).unwrap_err();
/// assert_eq!(err.root_cause().path().to_string(), "a.b");
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct MergePath {
    segments: Vec<PathSegment>,
}

impl MergePath {
    /// The empty path naming the merge root.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Segments from the root outwards.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of segments.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` when the path names the merge root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns `true` when the path names the merge root.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.is_root()
    }
}

impl From<Vec<PathSegment>> for MergePath {
    fn from(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }
}

impl fmt::Display for MergePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return f.write_str("<root>");
        }
        for (position, segment) in self.segments.iter().enumerate() {
            if position > 0 && matches!(segment, PathSegment::Key(_)) {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
enum Segment<'a> {
    Key(&'a str),
    Identity(&'a IdentityKey),
    Pointer(&'a str),
}

impl Segment<'_> {
    /// Push this segment's owned form(s) onto `reversed`, which is built
    /// leaf first.
    fn push_reversed(self, reversed: &mut Vec<PathSegment>) {
        match self {
            Self::Key(key) => reversed.push(PathSegment::Key(key.to_owned())),
            Self::Identity(identity) => reversed.push(PathSegment::Identity(identity.clone())),
            Self::Pointer(pointer) => {
                if let Some(tokens) = pointer.strip_prefix('/') {
                    reversed.extend(tokens.split('/').rev().map(|token| {
                        PathSegment::Key(token.replace("~1", "/").replace("~0", "~"))
                    }));
                }
            }
        }
    }
}

/// Borrowed, append-only path threaded through recursive merges.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Context<'a> {
    parent: Option<&'a Context<'a>>,
    segment: Option<Segment<'a>>,
}

impl<'a> Context<'a> {
    pub(crate) const fn root() -> Self {
        Self {
            parent: None,
            segment: None,
        }
    }

    /// Root context for a merge into the node addressed by a JSON pointer.
    pub(crate) const fn at_pointer(pointer: &'a str) -> Self {
        Self {
            parent: None,
            segment: Some(Segment::Pointer(pointer)),
        }
    }

    pub(crate) const fn with_key<'b>(&'b self, key: &'b str) -> Context<'b>
    where
        'a: 'b,
    {
        Context {
            parent: Some(self),
            segment: Some(Segment::Key(key)),
        }
    }

    pub(crate) const fn with_identity<'b>(&'b self, identity: &'b IdentityKey) -> Context<'b>
    where
        'a: 'b,
    {
        Context {
            parent: Some(self),
            segment: Some(Segment::Identity(identity)),
        }
    }

    pub(crate) fn to_path(&self) -> MergePath {
        let mut segments = Vec::new();
        let mut frame = Some(self);
        while let Some(current) = frame {
            if let Some(segment) = current.segment {
                segment.push_reversed(&mut segments);
            }
            frame = current.parent;
        }
        segments.reverse();
        MergePath::from(segments)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::{Context, MergePath, PathSegment};
    use crate::identity::IdentityKey;

    fn identity(value: &serde_json::Value) -> IdentityKey {
        IdentityKey::from_value(value).unwrap_or_else(|err| panic!("encodes identity: {err}"))
    }

    #[rstest]
    fn root_renders_placeholder() {
        let path = Context::root().to_path();
        assert!(path.is_root());
        assert_eq!(path.to_string(), "<root>");
    }

    #[rstest]
    fn siblings_do_not_share_segments() {
        let root = Context::root();
        let parent = root.with_key("servers");
        let left = parent.with_key("left");
        let right = parent.with_key("right");

        assert_eq!(left.to_path().to_string(), "servers.left");
        assert_eq!(right.to_path().to_string(), "servers.right");
        assert_eq!(parent.to_path().len(), 1);
    }

    #[rstest]
    fn identities_render_in_brackets() {
        let web = identity(&json!("web"));
        let root = Context::root();
        let servers = root.with_key("servers");
        let element = servers.with_identity(&web);
        let port = element.with_key("port");

        let path = port.to_path();
        assert_eq!(path.to_string(), "servers[\"web\"].port");
        assert_eq!(
            path.segments(),
            [
                PathSegment::Key("servers".to_owned()),
                PathSegment::Identity(web.clone()),
                PathSegment::Key("port".to_owned()),
            ]
        );
    }

    #[rstest]
    #[case("", "<root>")]
    #[case("/service/env", "service.env")]
    #[case("/a~1b/c~0d", "a/b.c~d")]
    fn pointer_tokens_become_keys(#[case] pointer: &str, #[case] rendered: &str) {
        let base = Context::at_pointer(pointer);
        assert_eq!(base.to_path().to_string(), rendered);
    }

    #[rstest]
    fn pointer_prefixes_child_segments() {
        let base = Context::at_pointer("/service");
        let child = base.with_key("port");
        assert_eq!(child.to_path().to_string(), "service.port");
    }

    #[rstest]
    fn leading_identity_has_no_separator() {
        let id = identity(&json!(2));
        let path = MergePath::from(vec![
            PathSegment::Identity(id),
            PathSegment::Key("v".to_owned()),
        ]);
        assert_eq!(path.to_string(), "[2].v");
    }
}
