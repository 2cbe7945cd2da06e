use std::{
    fs::File,
    io::{self, Read, Write},
    path::Path,
};

use bincode::{config, Decode, Encode};

/// Save to file, using Bincode. We currently use this for config and snapshots.
pub fn save<T: Encode + ?Sized>(path: &Path, data: &T) -> io::Result<()> {
    let encoded = bincode::encode_to_vec(data, config::standard())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    let mut file = File::create(path)?;
    file.write_all(&encoded)?;
    Ok(())
}

/// Load from file, using Bincode.
pub fn load<T: Decode<()>>(path: &Path) -> io::Result<T> {
    let mut file = File::open(path)?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;

    let (decoded, _len) = bincode::decode_from_slice(&buffer, config::standard())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use std::env;

    use super::*;
    use crate::{config::Config, normals::NormalMode};

    #[test]
    fn config_survives_disk() {
        let path = env::temp_dir().join(format!("cloth_cfg_{}.cloth", std::process::id()));

        let cfg = Config {
            grid_width: 6,
            stiffness: 100.,
            normal_mode: NormalMode::Accumulate,
            ..Default::default()
        };
        save(&path, &cfg).unwrap();

        let loaded: Config = load(&path).unwrap();
        assert_eq!(loaded.grid_width, 6);
        assert_eq!(loaded.stiffness, 100.);
        assert_eq!(loaded.normal_mode, NormalMode::Accumulate);
        assert_eq!(loaded.gravity.y, cfg.gravity.y);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = env::temp_dir().join("cloth_this_file_does_not_exist.cloth");
        let result: io::Result<Config> = load(&path);
        assert!(result.is_err());
    }

    #[test]
    fn garbage_is_invalid_data() {
        let path = env::temp_dir().join(format!("cloth_garbage_{}.cloth", std::process::id()));
        std::fs::write(&path, [0xff_u8; 3]).unwrap();

        let result: io::Result<Config> = load(&path);
        assert!(result.is_err());

        std::fs::remove_file(&path).ok();
    }
}
