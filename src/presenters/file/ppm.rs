use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Default)]
pub struct PpmFilePresenter {}

impl FilePresenterPort for PpmFilePresenter {
    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> std::io::Result<()> {
        let mut file = BufWriter::new(std::fs::File::create(filepath)?);
        let size = buffer.size();

        // PPM header: P6 means binary RGB, then width, height and max_colour
        writeln!(file, "P6")?;
        writeln!(file, "{} {}", size.width(), size.height())?;
        writeln!(file, "255")?;
        file.write_all(buffer.buffer())?;
        file.flush()?;

        Ok(())
    }
}

impl PpmFilePresenter {
    pub fn new() -> Self {
        Self {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::viewport_size::ViewportSize;

    #[test]
    fn writes_binary_ppm_with_header() {
        let dir = std::env::temp_dir().join(format!("ppm-presenter-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("frame.ppm");
        let size = ViewportSize::new(2, 1).unwrap();
        let buffer = PixelBuffer::from_data(size, vec![255, 0, 0, 0, 0, 255]).unwrap();

        PpmFilePresenter::new().present(&buffer, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let header = b"P6\n2 1\n255\n";
        assert_eq!(&bytes[..header.len()], header);
        assert_eq!(&bytes[header.len()..], &[255, 0, 0, 0, 0, 255]);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let path = std::env::temp_dir()
            .join(format!("ppm-missing-{}", std::process::id()))
            .join("nested")
            .join("frame.ppm");
        let size = ViewportSize::new(1, 1).unwrap();
        let buffer = PixelBuffer::from_data(size, vec![0, 0, 0]).unwrap();

        assert!(PpmFilePresenter::new().present(&buffer, &path).is_err());
    }
}
