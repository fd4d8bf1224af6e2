//! One-shot resolution per link.
//!
//! A [`PreviewCell`] owns one link's preview state. Whatever decides that a
//! link has become relevant (scrolling into view, a batch job, a user
//! click) calls [`PreviewCell::trigger`]; only the first call starts a
//! resolution, later ones are no-ops. Observers read the current state with
//! [`PreviewCell::snapshot`] or wait on [`PreviewCell::settled`].
//!
//! Cells share nothing with each other: two cells for the same URL resolve
//! twice.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;

use super::MetadataResolver;
use crate::core::models::ExtractedLink;
use crate::metadata::LinkMetadata;

/// Preview state for one link, resolved at most once.
#[derive(Debug)]
pub struct PreviewCell {
    link: ExtractedLink,
    started: AtomicBool,
    state: watch::Sender<LinkMetadata>,
}

impl PreviewCell {
    /// A cell in the pending state, domain already derived.
    pub fn new(link: ExtractedLink) -> Self {
        let (state, _) = watch::channel(LinkMetadata::pending(&link.url));
        Self {
            link,
            started: AtomicBool::new(false),
            state,
        }
    }

    pub fn link(&self) -> &ExtractedLink {
        &self.link
    }

    /// `true` once [`trigger`](Self::trigger) has started a resolution.
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Starts resolving on the current tokio runtime.
    ///
    /// Returns `false` if a resolution was already started by an earlier
    /// call. The spawned task runs to completion even if nobody observes
    /// the result.
    pub fn trigger(self: &Arc<Self>, resolver: &Arc<MetadataResolver>) -> bool {
        if self.started.swap(true, Ordering::AcqRel) {
            return false;
        }

        let cell = Arc::clone(self);
        let resolver = Arc::clone(resolver);
        tokio::spawn(async move {
            let metadata = resolver.resolve(&cell.link).await;
            cell.state.send_replace(metadata);
        });
        true
    }

    /// The current state, pending or settled.
    pub fn snapshot(&self) -> LinkMetadata {
        self.state.borrow().clone()
    }

    /// A receiver notified when the state settles.
    pub fn subscribe(&self) -> watch::Receiver<LinkMetadata> {
        self.state.subscribe()
    }

    /// Waits until the record is no longer loading.
    ///
    /// Never completes if the cell is not triggered.
    pub async fn settled(&self) -> LinkMetadata {
        let mut rx = self.subscribe();
        match rx.wait_for(|meta| !meta.is_loading).await {
            Ok(meta) => meta.clone(),
            Err(_) => self.snapshot(),
        }
    }
}
