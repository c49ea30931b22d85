//! Sprite assets
//!
//! Seven images served next to the page. All must finish loading before the
//! game loop starts; a single failure aborts startup.

/// Sprite identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteId {
    Craft,
    Asteroid,
    /// 4x4 sheet of 64px animation cells
    Explosion,
    FullHeart,
    EmptyHeart,
    LifePowerUp,
    ShieldPowerUp,
}

impl SpriteId {
    pub const ALL: [SpriteId; 7] = [
        SpriteId::Craft,
        SpriteId::Asteroid,
        SpriteId::Explosion,
        SpriteId::FullHeart,
        SpriteId::EmptyHeart,
        SpriteId::LifePowerUp,
        SpriteId::ShieldPowerUp,
    ];

    /// Path relative to the page
    pub fn path(self) -> &'static str {
        match self {
            SpriteId::Craft => "spaceship.png",
            SpriteId::Asteroid => "asteroid-1.png",
            SpriteId::Explosion => "explosion.png",
            SpriteId::FullHeart => "full_heart.png",
            SpriteId::EmptyHeart => "empty_heart.png",
            SpriteId::LifePowerUp => "life_heal.png",
            SpriteId::ShieldPowerUp => "shield.png",
        }
    }

    /// Dense index into `ALL`
    pub fn index(self) -> usize {
        self as usize
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::Sprites;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlImageElement;

    use super::SpriteId;
    use crate::error::AssetError;

    /// Loaded images, indexed by `SpriteId`
    pub struct Sprites {
        images: Vec<HtmlImageElement>,
    }

    impl Sprites {
        pub fn get(&self, id: SpriteId) -> &HtmlImageElement {
            &self.images[id.index()]
        }

        /// Start every download at once, then wait for all of them
        pub async fn load_all() -> Result<Self, AssetError> {
            let mut pending = Vec::with_capacity(SpriteId::ALL.len());
            for id in SpriteId::ALL {
                let image = HtmlImageElement::new().map_err(|_| AssetError::Dom("img"))?;
                let loaded = js_sys::Promise::new(&mut |resolve, reject| {
                    image.set_onload(Some(resolve.unchecked_ref()));
                    image.set_onerror(Some(reject.unchecked_ref()));
                });
                image.set_src(id.path());
                pending.push((id, image, loaded));
            }

            let mut images = Vec::with_capacity(pending.len());
            for (id, image, loaded) in pending {
                JsFuture::from(loaded)
                    .await
                    .map_err(|_| AssetError::Load { path: id.path() })?;
                image.set_onload(None);
                image.set_onerror(None);
                images.push(image);
            }

            log::info!("Loaded {} sprites", images.len());
            Ok(Self { images })
        }
    }
}
