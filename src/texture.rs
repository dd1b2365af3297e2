//! Texture source resolution: mapping a texture reference (external
//! file name or embedded pixel data) to a cache key and a located
//! image, searching the configured texture directories.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use log::{debug, warn};

use crate::types::NiPixelData;

/// A texture reference as it appears in a NiSourceTexture block.
#[derive(Debug, Clone, Copy)]
pub enum TextureRef<'a> {
    /// External image file reference.
    External(&'a str),
    /// Pixel data packed inside the NIF.
    Embedded(&'a NiPixelData),
}

/// Key that uniquely identifies a texture for dedup caching: the
/// lower-cased path for external references, a content hash for
/// embedded data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TextureKey {
    Path(String),
    Content(u64),
}

/// Where the resolver found the image, if anywhere. A miss is a value,
/// not an error; the caller substitutes a placeholder and continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatedTexture {
    /// An existing file on disk, ready for the image loader.
    File(PathBuf),
    /// Raw embedded pixel payload.
    Bytes(Vec<u8>),
    /// Nothing found; carries the original reference for the warning
    /// the caller will attach to its placeholder.
    Missing(String),
}

/// Resolves texture references against an ordered list of search
/// directories. Owned per import session.
#[derive(Debug, Default)]
pub struct TextureResolver {
    search_dirs: Vec<PathBuf>,
}

impl TextureResolver {
    pub fn new(search_dirs: Vec<PathBuf>) -> Self {
        Self { search_dirs }
    }

    pub fn resolve(&self, source: TextureRef<'_>) -> (TextureKey, LocatedTexture) {
        match source {
            TextureRef::External(name) => {
                let key = TextureKey::Path(name.to_lowercase());
                (key, self.locate_external(name))
            }
            TextureRef::Embedded(pixels) => {
                let key = TextureKey::Content(content_hash(&pixels.pixel_bytes));
                if pixels.pixel_format.bytes_per_pixel().is_none() {
                    warn!(
                        "embedded texture has unsupported pixel format {:?}",
                        pixels.pixel_format
                    );
                    return (key, LocatedTexture::Missing("<embedded>".to_string()));
                }
                (key, LocatedTexture::Bytes(pixels.pixel_bytes.clone()))
            }
        }
    }

    fn locate_external(&self, name: &str) -> LocatedTexture {
        let normalized = normalize_separators(name);
        let candidates = candidate_names(&normalized);
        for dir in &self.search_dirs {
            for candidate in &candidates {
                let path = join_stripping_textures(dir, candidate);
                debug!("searching {}", path.display());
                if path.exists() {
                    debug!("found {}", path.display());
                    return LocatedTexture::File(path);
                }
            }
        }
        warn!("texture '{}' not found in any search directory", name);
        LocatedTexture::Missing(name.to_string())
    }
}

fn content_hash(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    bytes.hash(&mut hasher);
    hasher.finish()
}

fn normalize_separators(name: &str) -> String {
    name.replace(['\\', '/'], &MAIN_SEPARATOR.to_string())
}

/// All file names to try for a reference, in search order: the name as
/// given, its lower-cased form, then the stem with each alternate
/// extension in upper and lower case.
fn candidate_names(name: &str) -> Vec<String> {
    let mut names = vec![name.to_string(), name.to_lowercase()];
    let stem = match name.rfind('.') {
        Some(dot) => &name[..dot],
        None => name,
    };
    for ext in [
        ".DDS", ".dds", ".PNG", ".png", ".TGA", ".tga", ".BMP", ".bmp", ".JPG", ".jpg",
    ] {
        for base in [stem.to_string(), stem.to_lowercase()] {
            let candidate = format!("{}{}", base, ext);
            if !names.contains(&candidate) {
                names.push(candidate);
            }
        }
    }
    names.dedup();
    names
}

/// Join a candidate onto a search directory. If the reference starts
/// with a `textures` segment and the directory ends with one, strip the
/// directory's trailing segment so the joined path carries `textures`
/// only once (common Morrowind-style content layouts double it).
fn join_stripping_textures(dir: &Path, name: &str) -> PathBuf {
    let prefix = format!("textures{}", MAIN_SEPARATOR);
    let suffix = format!("{}textures", MAIN_SEPARATOR);
    if name.len() >= prefix.len()
        && name.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    {
        if let Some(dir_str) = dir.to_str() {
            if dir_str.len() >= suffix.len()
                && dir_str.as_bytes()[dir_str.len() - suffix.len()..]
                    .eq_ignore_ascii_case(suffix.as_bytes())
            {
                return Path::new(&dir_str[..dir_str.len() - suffix.len()]).join(name);
            }
        }
    }
    dir.join(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PixelFormat;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn resolves_exact_external_path() {
        let dir = TempDir::new().unwrap();
        let tex = dir.path().join("armor").join("helmet.dds");
        touch(&tex);
        let resolver = TextureResolver::new(vec![dir.path().to_path_buf()]);

        let (key, located) = resolver.resolve(TextureRef::External("armor\\helmet.dds"));
        assert_eq!(key, TextureKey::Path("armor\\helmet.dds".to_string()));
        assert_eq!(located, LocatedTexture::File(tex));
    }

    #[test]
    fn cache_key_is_lowercased_path() {
        let resolver = TextureResolver::new(vec![]);
        let (key, _) = resolver.resolve(TextureRef::External("Armor\\Helmet.DDS"));
        assert_eq!(key, TextureKey::Path("armor\\helmet.dds".to_string()));
    }

    #[test]
    fn substitutes_alternate_extensions() {
        let dir = TempDir::new().unwrap();
        let tex = dir.path().join("shield.png");
        touch(&tex);
        let resolver = TextureResolver::new(vec![dir.path().to_path_buf()]);

        let (_, located) = resolver.resolve(TextureRef::External("shield.tga"));
        assert_eq!(located, LocatedTexture::File(tex));
    }

    #[test]
    fn strips_duplicated_textures_segment() {
        let dir = TempDir::new().unwrap();
        let search = dir.path().join("data").join("textures");
        let tex = search.join("armor").join("helmet.dds");
        touch(&tex);
        let resolver = TextureResolver::new(vec![search]);

        let (_, located) = resolver.resolve(TextureRef::External("textures\\armor\\helmet.dds"));
        // Joined as <data>/textures/armor/helmet.dds, not .../textures/textures/...
        assert_eq!(located, LocatedTexture::File(tex));
    }

    #[test]
    fn later_directory_wins_when_earlier_misses() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("empty");
        let second = dir.path().join("full");
        fs::create_dir_all(&first).unwrap();
        let tex = second.join("rock.dds");
        touch(&tex);
        let resolver = TextureResolver::new(vec![first, second]);

        let (_, located) = resolver.resolve(TextureRef::External("rock.dds"));
        assert_eq!(located, LocatedTexture::File(tex));
    }

    #[test]
    fn missing_texture_is_a_value_not_an_error() {
        let dir = TempDir::new().unwrap();
        let resolver = TextureResolver::new(vec![dir.path().to_path_buf()]);
        let (_, located) = resolver.resolve(TextureRef::External("nowhere.dds"));
        assert_eq!(located, LocatedTexture::Missing("nowhere.dds".to_string()));
    }

    #[test]
    fn embedded_data_keys_by_content() {
        let pixels = NiPixelData {
            pixel_format: PixelFormat::Rgba8,
            width: 2,
            height: 2,
            pixel_bytes: vec![0xFF; 16],
        };
        let resolver = TextureResolver::new(vec![]);
        let (key_a, located) = resolver.resolve(TextureRef::Embedded(&pixels));
        let (key_b, _) = resolver.resolve(TextureRef::Embedded(&pixels));
        assert_eq!(key_a, key_b);
        assert_eq!(located, LocatedTexture::Bytes(vec![0xFF; 16]));

        let other = NiPixelData {
            pixel_bytes: vec![0x00; 16],
            ..pixels.clone()
        };
        let (key_c, _) = resolver.resolve(TextureRef::Embedded(&other));
        assert_ne!(key_a, key_c);
    }

    #[test]
    fn unsupported_embedded_format_degrades_to_missing() {
        let pixels = NiPixelData {
            pixel_format: PixelFormat::Unknown(7),
            width: 1,
            height: 1,
            pixel_bytes: vec![0],
        };
        let resolver = TextureResolver::new(vec![]);
        let (_, located) = resolver.resolve(TextureRef::Embedded(&pixels));
        assert!(matches!(located, LocatedTexture::Missing(_)));
    }
}
