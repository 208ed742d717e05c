use std::io::Write;

use nmview_core::{export::write_xyz_frame, Coordinates, CoordinateView};

/// Prints every path it receives as multi-frame xyz, one block per frame with
/// the frame label as comment.
pub struct XyzStreamView<W> {
    out: W,
}

impl<W: Write> XyzStreamView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> CoordinateView for XyzStreamView<W> {
    fn set_coords(&mut self, coords: &Coordinates) {
        log::debug!("showing configuration with {} coordinates", coords.len());
    }

    fn set_coords_path(&mut self, frames: &[Coordinates], labels: Option<&[String]>) {
        for (i, frame) in frames.iter().enumerate() {
            let comment = labels
                .and_then(|labels| labels.get(i))
                .cloned()
                .unwrap_or_else(|| format!("frame {i}"));

            if let Err(err) = write_xyz_frame(&mut self.out, frame, &comment) {
                log::error!("failed to print frame {i}: {err}");
                return;
            }
        }
    }

    // the terminal can't animate, the frames are already printed in order
    fn start_animation(&mut self) {}

    fn stop_animation(&mut self) {}
}

#[cfg(test)]
mod tests {
    use nalgebra::dvector;

    use super::*;

    #[test]
    fn frames_are_labeled() {
        let mut view = XyzStreamView::new(Vec::new());
        let labels = vec!["energy=-1".to_owned()];
        view.set_coords_path(
            &[dvector![0.0, 0.0, 0.0], dvector![1.0, 0.0, 0.0]],
            Some(&labels),
        );

        let text = String::from_utf8(view.out).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[1], "energy=-1");
        assert_eq!(lines[4], "frame 1");
    }
}
