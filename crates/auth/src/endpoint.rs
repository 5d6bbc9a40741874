//! Endpoint visibility model.
//!
//! Visibility is declared at registration time through [`EndpointDescriptor`]
//! rather than discovered by runtime reflection. The `@public` doc-marker
//! convention survives as one descriptor source ([`DocAnnotated`]) so
//! existing handler documentation keeps working.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::MetadataError;

/// Whether an endpoint requires token verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Bypasses token verification entirely.
    Public,
    /// Requires a valid token.
    Protected,
}

/// Opaque handle to the target operation, answering "is this endpoint marked
/// public?".
pub trait EndpointDescriptor: Send + Sync {
    fn name(&self) -> &str;

    fn visibility(&self) -> Result<Visibility, MetadataError>;
}

/// Descriptor declared directly in code.
#[derive(Debug, Clone)]
pub struct StaticVisibility {
    name: String,
    visibility: Visibility,
}

impl StaticVisibility {
    pub fn public(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Public,
        }
    }

    pub fn protected(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visibility: Visibility::Protected,
        }
    }
}

impl EndpointDescriptor for StaticVisibility {
    fn name(&self) -> &str {
        &self.name
    }

    fn visibility(&self) -> Result<Visibility, MetadataError> {
        Ok(self.visibility)
    }
}

/// Descriptor backed by free-form documentation text.
///
/// The endpoint is public iff the text contains an `@public` marker followed
/// by end-of-text, whitespace, or a newline.
#[derive(Debug, Clone)]
pub struct DocAnnotated {
    name: String,
    docs: Option<String>,
}

impl DocAnnotated {
    pub fn new(name: impl Into<String>, docs: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docs: Some(docs.into()),
        }
    }

    /// An endpoint whose documentation could not be obtained. Visibility can
    /// not be answered for it.
    pub fn undocumented(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            docs: None,
        }
    }
}

impl EndpointDescriptor for DocAnnotated {
    fn name(&self) -> &str {
        &self.name
    }

    fn visibility(&self) -> Result<Visibility, MetadataError> {
        let docs = self.docs.as_deref().ok_or(MetadataError::MissingDocs)?;
        if has_public_marker(docs) {
            Ok(Visibility::Public)
        } else {
            Ok(Visibility::Protected)
        }
    }
}

/// `@public` must be followed by end-of-text or whitespace, so `@publicX`
/// does not count as a marker.
fn has_public_marker(docs: &str) -> bool {
    const MARKER: &str = "@public";

    docs.match_indices(MARKER).any(|(idx, _)| {
        docs[idx + MARKER.len()..]
            .chars()
            .next()
            .is_none_or(char::is_whitespace)
    })
}

/// Descriptor for an endpoint the host never registered.
///
/// Visibility can not be answered; the gate reports it as a server-side
/// wiring failure.
#[derive(Debug, Clone)]
pub struct Unregistered {
    name: String,
}

impl Unregistered {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl EndpointDescriptor for Unregistered {
    fn name(&self) -> &str {
        &self.name
    }

    fn visibility(&self) -> Result<Visibility, MetadataError> {
        Err(MetadataError::Unregistered {
            name: self.name.clone(),
        })
    }
}

/// Registration-time mapping from endpoint name to its descriptor.
#[derive(Default)]
pub struct EndpointRegistry {
    endpoints: HashMap<String, Box<dyn EndpointDescriptor>>,
}

impl EndpointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor under its own name. A later registration with
    /// the same name replaces the earlier one.
    pub fn register(&mut self, descriptor: impl EndpointDescriptor + 'static) {
        self.endpoints
            .insert(descriptor.name().to_string(), Box::new(descriptor));
    }

    pub fn get(&self, name: &str) -> Option<&dyn EndpointDescriptor> {
        self.endpoints.get(name).map(|d| d.as_ref())
    }
}
