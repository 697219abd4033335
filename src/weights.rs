use std::path::Path;

use burn::{
    module::Module,
    record::{FullPrecisionSettings, Recorder, RecorderError},
    tensor::{backend::Backend, Device},
};
use burn_import::pytorch::{LoadArgs, PyTorchFileRecorder};

use crate::adapter::{BifpnAdapter, BifpnAdapterConfig, BifpnAdapterRecord};

impl BifpnAdapterConfig {
    /// Initialize the adapter and load weights exported by the PyTorch
    /// `bifpn` package.
    pub fn init_from_pytorch<B: Backend>(
        &self,
        torch_weights: impl AsRef<Path>,
        device: &Device<B>,
    ) -> Result<BifpnAdapter<B>, RecorderError> {
        let model = self.init(device);
        let record = load_weights_record(torch_weights, device)?;
        Ok(model.load_record(record))
    }

    /// Download the checkpoint to the local cache directory, then load it as
    /// in [`init_from_pytorch`](Self::init_from_pytorch).
    #[cfg(feature = "pretrained")]
    pub fn init_from_pytorch_url<B: Backend>(
        &self,
        url: &str,
        device: &Device<B>,
    ) -> Result<BifpnAdapter<B>, RecorderError> {
        let torch_weights = download(url).map_err(|err| {
            RecorderError::Unknown(format!("Could not download weights.\nError: {err}"))
        })?;
        self.init_from_pytorch(torch_weights, device)
    }
}

/// Load pre-trained PyTorch weights as a record.
///
/// The upstream module keeps its projections in a `ModuleList` named
/// `adapters`, so the checkpoint keys (`adapters.{i}.weight`,
/// `adapters.{i}.bias`) already line up with this crate's record layout and
/// no key remapping is needed.
fn load_weights_record<B: Backend, P: AsRef<Path>>(
    torch_weights: P,
    device: &Device<B>,
) -> Result<BifpnAdapterRecord<B>, RecorderError> {
    let load_args = LoadArgs::new(torch_weights.as_ref().into());
    PyTorchFileRecorder::<FullPrecisionSettings>::new().load(load_args, device)
}

/// Download the pre-trained weights to the local cache directory.
#[cfg(feature = "pretrained")]
fn download(url: &str) -> Result<std::path::PathBuf, std::io::Error> {
    use std::{
        fs::{create_dir_all, File},
        io::Write,
    };

    use burn::data::network::downloader;

    let model_dir = dirs::home_dir()
        .expect("Should be able to get home directory")
        .join(".cache")
        .join("bifpn-adapter-burn");

    if !model_dir.exists() {
        create_dir_all(&model_dir)?;
    }

    let file_base_name = url.rsplit_once('/').unwrap().1;
    let file_name = model_dir.join(file_base_name);
    if !file_name.exists() {
        let bytes = downloader::download_file_as_bytes(url, file_base_name);

        let mut output_file = File::create(&file_name)?;
        let bytes_written = output_file.write(&bytes)?;

        if bytes_written != bytes.len() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "Failed to write the whole model weights file.",
            ));
        }
    }

    Ok(file_name)
}
