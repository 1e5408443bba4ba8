use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytemuck::Pod;
use parking_lot::{RwLock, RwLockReadGuard};

// Global buffer ID generator
static NEXT_BUFFER_ID: AtomicU64 = AtomicU64::new(0);

/// Generic CPU-side data buffer.
///
/// Holds the CPU copy of vertex, index, uniform or storage data together
/// with the usage flags the GPU backend needs to allocate the real buffer.
#[derive(Debug)]
pub struct DataBuffer {
    pub id: u64,
    pub label: String,
    version: AtomicU64,
    data: RwLock<Vec<u8>>,
    pub usage: wgpu::BufferUsages,
}

/// Cheap shared handle to a [`DataBuffer`].
///
/// The renderer re-uploads a buffer when the version it last observed has
/// changed; writers bump the version on every [`update`](Self::update).
#[derive(Debug, Clone)]
pub struct BufferRef(Arc<DataBuffer>);

impl PartialEq for BufferRef {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for BufferRef {}

impl std::hash::Hash for BufferRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl BufferRef {
    pub fn new<T: Pod>(data: &[T], usage: wgpu::BufferUsages, label: Option<&str>) -> Self {
        Self::from_bytes(bytemuck::cast_slice(data), usage, label)
    }

    pub fn from_bytes(data: &[u8], usage: wgpu::BufferUsages, label: Option<&str>) -> Self {
        Self(Arc::new(DataBuffer {
            id: NEXT_BUFFER_ID.fetch_add(1, Ordering::Relaxed),
            label: label.unwrap_or("Buffer").to_string(),
            version: AtomicU64::new(0),
            data: RwLock::new(data.to_vec()),
            usage,
        }))
    }

    pub fn empty(usage: wgpu::BufferUsages, label: Option<&str>) -> Self {
        Self::from_bytes(&[], usage, label)
    }

    // === Lock-free metadata access ===

    pub fn version(&self) -> u64 {
        self.0.version.load(Ordering::Relaxed)
    }

    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn usage(&self) -> wgpu::BufferUsages {
        self.0.usage
    }

    pub fn label(&self) -> &str {
        &self.0.label
    }

    /// Byte length of the current contents.
    pub fn len(&self) -> usize {
        self.0.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // === Data update ===

    /// Replaces the contents and bumps the version counter.
    pub fn update<T: Pod>(&self, data: &[T]) {
        {
            let mut inner = self.0.data.write();
            inner.clear();
            inner.extend_from_slice(bytemuck::cast_slice(data));
        }
        self.0.version.fetch_add(1, Ordering::Relaxed);
    }

    /// Read access to the raw contents.
    pub fn read_data(&self) -> RwLockReadGuard<'_, Vec<u8>> {
        self.0.data.read()
    }
}

impl std::ops::Deref for BufferRef {
    type Target = DataBuffer;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
