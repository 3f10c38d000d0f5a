//! Reference-counted texture cache.
//!
//! One cache instance serves a whole scene. Lookup and reference-count
//! changes happen under a single lock so a texture can never be disposed
//! between a hit and its increment. Native resources are released on the
//! render thread only, and the cache waits for that release before it
//! forgets the entry.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;
use terra_gfx::RenderThread;

use crate::DecodedTexture;
use crate::error::Result;

/// Backend-side identifier of an uploaded texture.
pub type NativeTextureId = u64;

/// Uploads decoded textures and releases them again.
///
/// `dispose` is only ever invoked on the render thread.
pub trait TextureGpu: Send + Sync {
    fn upload(&self, texture: &DecodedTexture) -> NativeTextureId;
    fn dispose(&self, id: NativeTextureId);
}

/// Maps a texture name to its raw container bytes.
pub type Resolver = Box<dyn Fn(&str) -> io::Result<Vec<u8>> + Send + Sync>;

struct CacheEntry {
    refs: usize,
    native: NativeTextureId,
}

struct CacheShared {
    entries: Mutex<HashMap<String, CacheEntry>>,
    resolve: Resolver,
    gpu: Arc<dyn TextureGpu>,
    render: Arc<RenderThread>,
}

impl CacheShared {
    fn release(&self, name: &str) {
        let mut entries = self.entries.lock();
        let Some(entry) = entries.get_mut(name) else {
            return;
        };
        entry.refs -= 1;
        if entry.refs > 0 {
            return;
        }

        // Last handle gone: free the native resource on the render thread
        // and wait for it before dropping the entry.
        let native = entry.native;
        let gpu = Arc::clone(&self.gpu);
        self.render.submit(move || gpu.dispose(native), true);
        entries.remove(name);
        debug!("texture {name} evicted");
    }

    fn dispose_native(&self, native: NativeTextureId) {
        let gpu = Arc::clone(&self.gpu);
        self.render.submit(move || gpu.dispose(native), true);
    }
}

/// The texture store: decode once, upload once, share by handle.
pub struct TextureCache {
    shared: Arc<CacheShared>,
    error_texture: NativeTextureId,
}

impl TextureCache {
    /// Builds a cache over a byte resolver and a graphics backend.
    ///
    /// `error_texture` is a container decoded and uploaded immediately;
    /// callers substitute it when [`TextureCache::acquire`] fails.
    pub fn new(
        resolve: Resolver,
        gpu: Arc<dyn TextureGpu>,
        render: Arc<RenderThread>,
        error_texture: &[u8],
    ) -> Result<Self> {
        let decoded = crate::load_texture(error_texture)?;
        let error_texture = gpu.upload(&decoded);
        Ok(Self {
            shared: Arc::new(CacheShared {
                entries: Mutex::new(HashMap::new()),
                resolve,
                gpu,
                render,
            }),
            error_texture,
        })
    }

    /// Returns a handle to the named texture, decoding and uploading it on
    /// first use. Subsequent acquires of a resident texture only bump its
    /// reference count.
    pub fn acquire(&self, name: &str) -> Result<TextureHandle> {
        let mut entries = self.shared.entries.lock();
        if let Some(entry) = entries.get_mut(name) {
            entry.refs += 1;
            return Ok(TextureHandle {
                shared: Arc::clone(&self.shared),
                name: name.to_string(),
                native: entry.native,
            });
        }

        let bytes = (self.shared.resolve)(name)?;
        let decoded = crate::load_texture(&bytes)?;
        let native = self.shared.gpu.upload(&decoded);
        entries.insert(
            name.to_string(),
            CacheEntry { refs: 1, native },
        );
        debug!("texture {name} resident as {native}");

        Ok(TextureHandle {
            shared: Arc::clone(&self.shared),
            name: name.to_string(),
            native,
        })
    }

    /// The fallback texture uploaded at construction.
    pub fn error_texture(&self) -> NativeTextureId {
        self.error_texture
    }

    /// Number of textures currently resident.
    pub fn resident_count(&self) -> usize {
        self.shared.entries.lock().len()
    }
}

impl Drop for TextureCache {
    fn drop(&mut self) {
        self.shared.dispose_native(self.error_texture);
    }
}

/// A live reference to a cached texture.
///
/// Handles move; they do not clone. Re-acquire from the cache to take
/// another reference. Dropping the last handle for a name frees the native
/// texture on the render thread.
pub struct TextureHandle {
    shared: Arc<CacheShared>,
    name: String,
    native: NativeTextureId,
}

impl TextureHandle {
    /// The backend id to bind for drawing.
    pub fn native(&self) -> NativeTextureId {
        self.native
    }

    /// The name this handle was acquired under.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for TextureHandle {
    fn drop(&mut self) {
        self.shared.release(&self.name);
    }
}

impl fmt::Debug for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureHandle")
            .field("name", &self.name)
            .field("native", &self.native)
            .finish()
    }
}
