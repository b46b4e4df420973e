//! QR branding precedence.
//!
//! Decides which logo ends up in the centre of a generated QR code. The decision
//! is a pure function of the lookup results and the caller's options, so it is
//! tested here directly without any repository in the loop.
//!
//! # Precedence
//!
//! 1. URL is not a known short link → platform logo
//! 2. Link has no resolvable workspace, or the workspace is on the free plan →
//!    platform logo
//! 3. No caller logo, workspace has a logo, `hideLogo` not set → workspace logo
//! 4. Otherwise → caller logo, possibly none
//!
//! `hideLogo` only matters in step 3: free and unknown links always carry the
//! platform logo.

use crate::domain::entities::{ShortLink, Workspace};

/// Logo used when platform branding is enforced.
pub const DEFAULT_QR_LOGO: &str = "https://assets.example.com/qr-logo.png";

/// What the lookup layer found for the requested URL.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LinkOwnership<'a> {
    /// The URL is not a short link managed by the platform.
    External,
    /// The short link exists but its workspace could not be resolved.
    Unowned,
    /// The short link and its owning workspace.
    Workspace(&'a Workspace),
}

impl<'a> LinkOwnership<'a> {
    /// Classifies optional lookup results.
    ///
    /// A workspace without a short link is ignored: ownership is only ever
    /// derived through the link.
    pub fn from_lookup(short_link: Option<&ShortLink>, workspace: Option<&'a Workspace>) -> Self {
        match (short_link, workspace) {
            (None, _) => LinkOwnership::External,
            (Some(_), None) => LinkOwnership::Unowned,
            (Some(_), Some(workspace)) => LinkOwnership::Workspace(workspace),
        }
    }
}

/// Outcome of branding resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveLogo<'a> {
    PlatformDefault,
    Workspace(&'a str),
    Caller(&'a str),
    NoLogo,
}

impl<'a> EffectiveLogo<'a> {
    /// Logo reference to embed, given the configured platform logo.
    pub fn src(self, platform_logo: &'a str) -> Option<&'a str> {
        match self {
            EffectiveLogo::PlatformDefault => Some(platform_logo),
            EffectiveLogo::Workspace(logo) | EffectiveLogo::Caller(logo) => Some(logo),
            EffectiveLogo::NoLogo => None,
        }
    }

    /// Short label used for logs and metrics.
    pub fn source(self) -> &'static str {
        match self {
            EffectiveLogo::PlatformDefault => "platform",
            EffectiveLogo::Workspace(_) => "workspace",
            EffectiveLogo::Caller(_) => "caller",
            EffectiveLogo::NoLogo => "none",
        }
    }
}

/// Resolves the logo to embed in a QR code.
pub fn resolve_logo<'a>(
    ownership: LinkOwnership<'a>,
    caller_logo: Option<&'a str>,
    hide_logo: bool,
) -> EffectiveLogo<'a> {
    let workspace = match ownership {
        LinkOwnership::External | LinkOwnership::Unowned => return EffectiveLogo::PlatformDefault,
        LinkOwnership::Workspace(workspace) if workspace.plan.is_free() => {
            return EffectiveLogo::PlatformDefault;
        }
        LinkOwnership::Workspace(workspace) => workspace,
    };

    match (caller_logo, workspace.logo.as_deref()) {
        (None, Some(logo)) if !hide_logo => EffectiveLogo::Workspace(logo),
        (Some(logo), _) => EffectiveLogo::Caller(logo),
        (None, _) => EffectiveLogo::NoLogo,
    }
}
