//! Cache lifetime tests with a counting backend.

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use parking_lot::Mutex;
use pretty_assertions::assert_eq;

use terra_blp::{DecodedTexture, NativeTextureId, TextureCache, TextureError, TextureGpu};
use terra_gfx::RenderThread;

/// Minimal raw-ARGB container: one 1×1 mip.
fn tiny_blp(pixel: [u8; 4]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(152);
    buf.extend_from_slice(b"BLP2");
    buf.extend_from_slice(&1u32.to_le_bytes());
    buf.extend_from_slice(&[3, 8, 0, 0]);
    buf.extend_from_slice(&1u32.to_le_bytes());
    buf.extend_from_slice(&1u32.to_le_bytes());
    let mut offsets = [0u32; 16];
    let mut sizes = [0u32; 16];
    offsets[0] = 148;
    sizes[0] = 4;
    for v in offsets.iter().chain(sizes.iter()) {
        buf.extend_from_slice(&v.to_le_bytes());
    }
    buf.extend_from_slice(&pixel);
    buf
}

#[derive(Default)]
struct CountingGpu {
    next_id: AtomicU64,
    uploads: AtomicUsize,
    disposed: Mutex<Vec<(NativeTextureId, Option<String>)>>,
}

impl TextureGpu for CountingGpu {
    fn upload(&self, _texture: &DecodedTexture) -> NativeTextureId {
        self.uploads.fetch_add(1, Ordering::SeqCst);
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn dispose(&self, id: NativeTextureId) {
        let thread = std::thread::current().name().map(str::to_string);
        self.disposed.lock().push((id, thread));
    }
}

struct Fixture {
    cache: TextureCache,
    gpu: Arc<CountingGpu>,
    resolve_calls: Arc<AtomicUsize>,
}

fn fixture() -> Fixture {
    let _ = env_logger::builder().is_test(true).try_init();
    let gpu = Arc::new(CountingGpu::default());
    let resolve_calls = Arc::new(AtomicUsize::new(0));
    let calls = Arc::clone(&resolve_calls);
    let resolve = Box::new(move |name: &str| {
        calls.fetch_add(1, Ordering::SeqCst);
        match name {
            "grass" => Ok(tiny_blp([0x10, 0x20, 0x30, 0xFF])),
            "rock" => Ok(tiny_blp([0x50, 0x60, 0x70, 0xFF])),
            _ => Err(io::Error::new(io::ErrorKind::NotFound, name.to_string())),
        }
    });

    let render = Arc::new(RenderThread::spawn().unwrap());
    let cache = TextureCache::new(
        resolve,
        Arc::<CountingGpu>::clone(&gpu),
        render,
        &tiny_blp([0xFF, 0x00, 0xFF, 0xFF]),
    )
    .unwrap();

    Fixture {
        cache,
        gpu,
        resolve_calls,
    }
}

#[test]
fn repeated_acquires_share_one_decode() {
    let f = fixture();

    let first = f.cache.acquire("grass").unwrap();
    let second = f.cache.acquire("grass").unwrap();

    assert_eq!(f.resolve_calls.load(Ordering::SeqCst), 1);
    // One upload for the error texture, one for grass.
    assert_eq!(f.gpu.uploads.load(Ordering::SeqCst), 2);
    assert_eq!(first.native(), second.native());
    assert_eq!(f.cache.resident_count(), 1);
}

#[test]
fn last_handle_drop_disposes_once_on_the_render_thread() {
    let f = fixture();

    let first = f.cache.acquire("grass").unwrap();
    let native = first.native();
    let second = f.cache.acquire("grass").unwrap();

    drop(first);
    assert!(f.gpu.disposed.lock().is_empty());
    assert_eq!(f.cache.resident_count(), 1);

    drop(second);
    let disposed = f.gpu.disposed.lock();
    assert_eq!(disposed.len(), 1);
    assert_eq!(disposed[0].0, native);
    assert_eq!(disposed[0].1.as_deref(), Some("terra-render"));
    drop(disposed);
    assert_eq!(f.cache.resident_count(), 0);
}

#[test]
fn eviction_forces_a_fresh_decode() {
    let f = fixture();

    let handle = f.cache.acquire("grass").unwrap();
    drop(handle);
    let handle = f.cache.acquire("grass").unwrap();

    assert_eq!(f.resolve_calls.load(Ordering::SeqCst), 2);
    assert_eq!(f.gpu.disposed.lock().len(), 1);
    drop(handle);
}

#[test]
fn distinct_names_are_distinct_entries() {
    let f = fixture();

    let grass = f.cache.acquire("grass").unwrap();
    let rock = f.cache.acquire("rock").unwrap();

    assert_ne!(grass.native(), rock.native());
    assert_eq!(f.cache.resident_count(), 2);
}

#[test]
fn unresolvable_names_error_and_leave_the_fallback() {
    let f = fixture();

    let err = f.cache.acquire("missing").unwrap_err();
    assert!(matches!(err, TextureError::Io(_)));
    assert_eq!(f.cache.resident_count(), 0);

    // The error texture was uploaded at construction and stays available.
    assert_eq!(f.cache.error_texture(), 1);
}

#[test]
fn resolver_can_be_backed_by_files_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("grass.blp"), tiny_blp([1, 2, 3, 0xFF])).unwrap();

    let gpu = Arc::new(CountingGpu::default());
    let root = dir.path().to_path_buf();
    let resolve = Box::new(move |name: &str| std::fs::read(root.join(name)));
    let render = Arc::new(RenderThread::spawn().unwrap());
    let cache = TextureCache::new(
        resolve,
        Arc::<CountingGpu>::clone(&gpu),
        render,
        &tiny_blp([0xFF, 0x00, 0xFF, 0xFF]),
    )
    .unwrap();

    let handle = cache.acquire("grass.blp").unwrap();
    assert_eq!(handle.name(), "grass.blp");
    assert!(matches!(
        cache.acquire("missing.blp").unwrap_err(),
        TextureError::Io(_)
    ));
}

#[test]
fn dropping_the_cache_frees_the_error_texture() {
    let f = fixture();
    let error_texture = f.cache.error_texture();

    drop(f.cache);
    let disposed = f.gpu.disposed.lock();
    assert_eq!(disposed.len(), 1);
    assert_eq!(disposed[0].0, error_texture);
}
