/// Accumulation unit for one open scope.
///
/// A node collects the raw bytes written while it is the innermost scope. Its
/// body is only turned into a frame once the scope ends and the full length
/// is known.
#[derive(Debug, Default)]
pub(crate) struct Node {
    buffer: Vec<u8>,
    name: String,
    written: usize,
}

impl Node {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Appends `bytes` and returns how many were accepted.
    pub(crate) fn append(&mut self, bytes: &[u8]) -> usize {
        self.buffer.extend_from_slice(bytes);
        self.written += bytes.len();
        bytes.len()
    }

    pub(crate) fn assign_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn written(&self) -> usize {
        self.written
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.written == 0
    }

    pub(crate) fn body(&self) -> &[u8] {
        &self.buffer[..self.written]
    }
}
