//! Styled-image resolution: each original photo has one pre-rendered
//! variant per style, produced upstream by the external style-transfer
//! batch process and stored as `<group>/<name>_<style>.png`.

pub mod runner;

use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::foundation::error::{AtelierError, AtelierResult};

/// The available pretrained styles. `Original` is the unstyled photo
/// itself.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum StyleKind {
    #[default]
    Original,
    Cezanne,
    Monet,
    Ukiyoe,
    Vangogh,
}

impl StyleKind {
    /// All styles, in UI order.
    pub const ALL: [StyleKind; 5] = [
        StyleKind::Original,
        StyleKind::Cezanne,
        StyleKind::Monet,
        StyleKind::Ukiyoe,
        StyleKind::Vangogh,
    ];

    /// The stable lowercase name used in file stems and model names.
    pub fn as_str(self) -> &'static str {
        match self {
            StyleKind::Original => "original",
            StyleKind::Cezanne => "cezanne",
            StyleKind::Monet => "monet",
            StyleKind::Ukiyoe => "ukiyoe",
            StyleKind::Vangogh => "vangogh",
        }
    }

    /// The styles produced by the transfer process (everything except
    /// `Original`).
    pub fn styled() -> impl Iterator<Item = StyleKind> {
        Self::ALL.into_iter().filter(|s| *s != StyleKind::Original)
    }
}

/// A source of pre-rendered styled images for one original photo.
pub trait StyleSource {
    /// Load the image for `style`; `StyleKind::Original` resolves to the
    /// base photo.
    fn styled_image(&self, style: StyleKind) -> AtelierResult<RgbImage>;
}

/// Style source backed by a group directory laid out as
/// `<group>/<name>_<style>.png`.
#[derive(Clone, Debug)]
pub struct DirStyleSource {
    group_dir: PathBuf,
    group_name: String,
}

impl DirStyleSource {
    /// Create a source for `group_dir`; the group name is the directory's
    /// file name.
    pub fn new(group_dir: impl Into<PathBuf>) -> AtelierResult<Self> {
        let group_dir = group_dir.into();
        let group_name = group_dir
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_owned)
            .ok_or_else(|| {
                AtelierError::validation(format!(
                    "group directory '{}' has no usable name",
                    group_dir.display()
                ))
            })?;
        Ok(Self {
            group_dir,
            group_name,
        })
    }

    /// The on-disk path for `style`.
    pub fn path_for(&self, style: StyleKind) -> PathBuf {
        self.group_dir
            .join(format!("{}_{}.png", self.group_name, style.as_str()))
    }

    fn load(&self, path: &Path) -> AtelierResult<RgbImage> {
        let img = image::open(path).map_err(|e| {
            AtelierError::validation(format!("failed to load '{}': {e}", path.display()))
        })?;
        Ok(img.to_rgb8())
    }
}

impl StyleSource for DirStyleSource {
    fn styled_image(&self, style: StyleKind) -> AtelierResult<RgbImage> {
        self.load(&self.path_for(style))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn style_names_are_stable() {
        let names: Vec<&str> = StyleKind::ALL.iter().map(|s| s.as_str()).collect();
        assert_eq!(
            names,
            vec!["original", "cezanne", "monet", "ukiyoe", "vangogh"]
        );
    }

    #[test]
    fn styled_iterates_everything_but_original() {
        let styled: Vec<StyleKind> = StyleKind::styled().collect();
        assert_eq!(styled.len(), 4);
        assert!(!styled.contains(&StyleKind::Original));
    }

    #[test]
    fn paths_follow_the_group_layout() {
        let src = DirStyleSource::new("/data/workspace/sunset").unwrap();
        assert_eq!(
            src.path_for(StyleKind::Monet),
            PathBuf::from("/data/workspace/sunset/sunset_monet.png")
        );
    }

    #[test]
    fn images_round_trip_through_the_source() {
        let dir = tempfile::tempdir().unwrap();
        let group = dir.path().join("pier");
        std::fs::create_dir(&group).unwrap();
        let img = RgbImage::from_pixel(6, 4, Rgb([10, 20, 30]));
        img.save(group.join("pier_ukiyoe.png")).unwrap();

        let src = DirStyleSource::new(&group).unwrap();
        let loaded = src.styled_image(StyleKind::Ukiyoe).unwrap();
        assert_eq!(loaded, img);
    }

    #[test]
    fn missing_styles_are_reported_as_validation_errors() {
        let dir = tempfile::tempdir().unwrap();
        let group = dir.path().join("empty");
        std::fs::create_dir(&group).unwrap();
        let src = DirStyleSource::new(&group).unwrap();
        assert!(src.styled_image(StyleKind::Monet).is_err());
    }
}
