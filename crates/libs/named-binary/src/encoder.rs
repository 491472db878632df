//! Scope-buffered frame encoder.
//!
//! Each open scope owns a [`Node`] on an explicit stack. Leaf bytes land in
//! the innermost node; when the scope ends the node is either dropped (no
//! bytes) or flushed to the sink as one frame. The sink is only ever
//! appended to, so a frame's length prefix has to wait until its body is
//! complete.

use std::io::Write;

use crate::frame::write_frame;
use crate::node::Node;
use crate::{ArchiveError, EncoderOptions};

pub struct Encoder<W: Write> {
    sink: W,
    nodes: Vec<Node>,
    pending_name: String,
    options: EncoderOptions,
    frames_written: usize,
    bytes_written: usize,
}

impl<W: Write> Encoder<W> {
    pub fn new(sink: W) -> Self {
        Self::with_options(sink, EncoderOptions::default())
    }

    pub fn with_options(sink: W, options: EncoderOptions) -> Self {
        Self {
            sink,
            nodes: Vec::new(),
            pending_name: String::new(),
            options,
            frames_written: 0,
            bytes_written: 0,
        }
    }

    /// Opens a scope for one field, leaf or composite.
    pub fn scope_begin(&mut self) -> Result<(), ArchiveError> {
        if let Some(limit) = self.options.max_depth {
            if self.nodes.len() >= limit {
                return Err(ArchiveError::DepthExceeded { limit });
            }
        }
        if let Some(parent) = self.nodes.last() {
            if !parent.is_empty() {
                log::warn!(
                    "nb: scope opened under '{}' after {} direct bytes; its frame will follow this child",
                    parent.name(),
                    parent.written()
                );
            }
        }
        self.nodes.push(Node::new());
        log::trace!("nb: scope_begin depth={}", self.nodes.len());
        Ok(())
    }

    /// Stores the name for the next leaf write. An unconsumed name is
    /// overwritten.
    pub fn set_pending_name(&mut self, name: impl Into<String>) {
        self.pending_name = name.into();
    }

    /// Appends leaf bytes to the innermost scope.
    ///
    /// A pending name, if any, is consumed and becomes the scope's name.
    ///
    /// # Panics
    ///
    /// Panics if no scope is open.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), ArchiveError> {
        let pending = std::mem::take(&mut self.pending_name);
        let Some(node) = self.nodes.last_mut() else {
            panic!("write_bytes called with no open scope");
        };
        if !pending.is_empty() {
            node.assign_name(pending);
        }
        let accepted = node.append(bytes);
        if accepted != bytes.len() {
            return Err(ArchiveError::ShortWrite { requested: bytes.len(), written: accepted });
        }
        Ok(())
    }

    /// Writes leaf bytes under an explicit name.
    pub fn write_field(&mut self, name: &str, bytes: &[u8]) -> Result<(), ArchiveError> {
        self.set_pending_name(name);
        self.write_bytes(bytes)
    }

    /// Closes the innermost scope, flushing its frame unless it is empty.
    ///
    /// # Panics
    ///
    /// Panics if no scope is open.
    pub fn scope_end(&mut self) -> Result<(), ArchiveError> {
        let Some(node) = self.nodes.pop() else {
            panic!("scope_end called with no open scope");
        };
        if node.is_empty() {
            log::debug!("nb: elided empty scope at depth {}", self.nodes.len() + 1);
            return Ok(());
        }
        let len = write_frame(&mut self.sink, node.name(), node.body())?;
        self.frames_written += 1;
        self.bytes_written += len;
        log::trace!("nb: flushed frame '{}' body={} wire={}", node.name(), node.written(), len);
        Ok(())
    }

    /// Number of open scopes.
    pub fn depth(&self) -> usize {
        self.nodes.len()
    }

    pub fn pending_name(&self) -> Option<&str> {
        if self.pending_name.is_empty() {
            None
        } else {
            Some(&self.pending_name)
        }
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    pub fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Checks every scope was closed, flushes the sink and returns it.
    pub fn finish(mut self) -> Result<W, ArchiveError> {
        if !self.nodes.is_empty() {
            return Err(ArchiveError::UnbalancedScopes { open: self.nodes.len() });
        }
        self.sink.flush()?;
        Ok(self.sink)
    }

    /// Returns the sink, dropping any scopes that are still open.
    pub fn into_inner(self) -> W {
        self.sink
    }
}
