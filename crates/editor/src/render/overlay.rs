use bevy::prelude::*;
use body_canvas::{CanvasFrame, Layer, fit_unit_size};

/// Sprite showing the selected document's reference image.
#[derive(Component, Default)]
pub struct ReferenceImage {
  path: Option<String>,
}

pub fn spawn_reference_image(mut commands: Commands) {
  commands.spawn((
    Name::new("Reference image"),
    ReferenceImage::default(),
    Sprite::default(),
    Transform::from_xyz(0.0, 0.0, Layer::ReferenceImage.z()),
    Visibility::Hidden,
  ));
}

/// Anchors the image's bottom-left corner at the world origin, its longer side
/// one unit long.
pub fn update_reference_image(
  frame: Res<CanvasFrame>,
  asset_server: Res<AssetServer>,
  images: Res<Assets<Image>>,
  mut sprites: Query<(
    &mut ReferenceImage,
    &mut Sprite,
    &mut Transform,
    &mut Visibility,
  )>,
) {
  for (mut reference, mut sprite, mut transform, mut visibility) in sprites.iter_mut() {
    let Some(overlay) = frame.image_overlay.as_ref() else {
      visibility.set_if_neq(Visibility::Hidden);
      continue;
    };

    if reference.path.as_deref() != Some(overlay.path.as_str()) {
      debug!("Loading reference image {}", overlay.path);
      sprite.image = asset_server.load(overlay.path.clone());
      reference.path = Some(overlay.path.clone());
    }

    let Some(image) = images.get(&sprite.image) else {
      visibility.set_if_neq(Visibility::Hidden);
      continue;
    };

    let size = fit_unit_size(image.size_f32());
    if sprite.custom_size != Some(size) {
      sprite.custom_size = Some(size);
      transform.translation = (size * 0.5).extend(Layer::ReferenceImage.z());
    }
    let color = Color::WHITE.with_alpha(overlay.alpha);
    if sprite.color != color {
      sprite.color = color;
    }
    visibility.set_if_neq(Visibility::Inherited);
  }
}
