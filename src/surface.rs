//! Surfaces — where revealed text ends up.
//!
//! A surface only needs to replace everything it displays with a new string.
//! Hosts hand surfaces out through `SurfaceHost::resolve`, which may come up
//! empty; playback treats that as "nothing to do".

use crate::error::SurfaceError;

pub trait TextSurface {
    /// Replace the displayed content with `content`.
    fn replace(&mut self, content: &str) -> Result<(), SurfaceError>;
}

impl<S: TextSurface + ?Sized> TextSurface for &mut S {
    fn replace(&mut self, content: &str) -> Result<(), SurfaceError> {
        (**self).replace(content)
    }
}

impl<S: TextSurface + ?Sized> TextSurface for Box<S> {
    fn replace(&mut self, content: &str) -> Result<(), SurfaceError> {
        (**self).replace(content)
    }
}

/// Looks up a surface by target id.
pub trait SurfaceHost {
    type Surface: TextSurface;

    fn resolve(&mut self, target: &str) -> Option<Self::Surface>;
}

/// An in-memory surface that keeps every replacement it received.
///
/// After `detach` every further replacement fails with
/// `SurfaceError::Detached`, which is what a host sees when the element it
/// handed out disappears mid-playback.
#[derive(Debug, Default)]
pub struct MemorySurface {
    history: Vec<String>,
    detach_after: Option<usize>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Detach once `replacements` writes have landed.
    pub fn detach_after(replacements: usize) -> Self {
        Self {
            history: Vec::new(),
            detach_after: Some(replacements),
        }
    }

    pub fn detach(&mut self) {
        self.detach_after = Some(self.history.len());
    }

    pub fn is_attached(&self) -> bool {
        self.detach_after.is_none_or(|n| self.history.len() < n)
    }

    /// What the surface displays right now.
    pub fn content(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl TextSurface for MemorySurface {
    fn replace(&mut self, content: &str) -> Result<(), SurfaceError> {
        if !self.is_attached() {
            return Err(SurfaceError::Detached);
        }
        self.history.push(content.to_owned());
        Ok(())
    }
}

/// A host with a fixed set of named memory surfaces.
#[derive(Debug, Default)]
pub struct MemoryHost {
    targets: Vec<String>,
}

impl MemoryHost {
    pub fn with_targets<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }
}

impl SurfaceHost for MemoryHost {
    type Surface = MemorySurface;

    fn resolve(&mut self, target: &str) -> Option<MemorySurface> {
        self.targets
            .iter()
            .any(|t| t == target)
            .then(MemorySurface::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_surface_tracks_latest_content() {
        let mut surface = MemorySurface::new();
        assert_eq!(surface.content(), None);
        surface.replace("one").unwrap();
        surface.replace("two").unwrap();
        assert_eq!(surface.content(), Some("two"));
        assert_eq!(surface.history(), ["one", "two"]);
    }

    #[test]
    fn detached_surface_rejects_writes() {
        let mut surface = MemorySurface::detach_after(1);
        surface.replace("kept").unwrap();
        assert!(!surface.is_attached());
        assert!(matches!(surface.replace("lost"), Err(SurfaceError::Detached)));
        assert_eq!(surface.history(), ["kept"]);
    }

    #[test]
    fn memory_host_resolves_known_targets_only() {
        let mut host = MemoryHost::with_targets(["typedtext"]);
        assert!(host.resolve("typedtext").is_some());
        assert!(host.resolve("missing").is_none());
    }
}
