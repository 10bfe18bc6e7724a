//! The decode → resample → execute → rank pipeline.
//!
//! Synchronous calls run every stage on the caller's thread. The `*_until`,
//! `*_with_deadline` and `*_with_timeout` calls move the CPU-bound stages to
//! tokio's blocking pool and race them against a cancellation signal.
//!
//! Cancellation is cooperative only: a cancelled call stops waiting, not
//! working. The blocking task keeps running until the graph finishes and its
//! result is dropped, so heavy cancellation churn still costs CPU time.

use {
    crate::{
        engine,
        error::{InferError, Result},
        model::{ImageOptions, Model},
        prediction::{Predictions, rank},
    },
    base::Tensor,
    image::EncodedImage,
    std::{future::Future, io::Read, time::Duration},
    tokio::{
        io::{AsyncRead, AsyncReadExt},
        time::Instant,
    },
};

impl Model {
    /// Runs the graph on an encoded image and returns the raw output tensor.
    pub fn infer<R: Read>(&self, reader: R, options: &ImageOptions) -> Result<Tensor<f32>> {
        let encoded = image::decode(reader)?;
        self.infer_encoded(&encoded, options)
    }

    /// Runs the graph and ranks the output against the model's classes.
    pub fn evaluate<R: Read>(&self, reader: R, options: &ImageOptions) -> Result<Predictions> {
        let output = self.infer(reader, options)?;
        Ok(rank(&output.data, self.classes()))
    }

    pub fn infer_encoded(
        &self,
        encoded: &EncodedImage,
        options: &ImageOptions,
    ) -> Result<Tensor<f32>> {
        let target = self.input().dimensions.spatial();
        base::log_debug!(
            "Resampling {} byte {} image to {:?} ({:?})",
            encoded.len(),
            encoded.format,
            target,
            options.channels()
        );
        let pixels = image::resample(encoded, target, options.channels())?;
        engine::run(self, pixels)
    }

    fn evaluate_bytes(&self, bytes: Vec<u8>, options: &ImageOptions) -> Result<Predictions> {
        let output = self.infer_encoded(&EncodedImage::from_bytes(bytes)?, options)?;
        Ok(rank(&output.data, self.classes()))
    }

    /// Like [`Model::infer`], but gives up with [`InferError::Cancelled`] as
    /// soon as `cancel` completes.
    pub async fn infer_until<R, C>(
        &self,
        reader: R,
        options: ImageOptions,
        cancel: C,
    ) -> Result<Tensor<f32>>
    where
        R: AsyncRead + Unpin,
        C: Future<Output = ()>,
    {
        let model = self.clone();
        race(reader, cancel, move |bytes| {
            model.infer_encoded(&EncodedImage::from_bytes(bytes)?, &options)
        })
        .await
    }

    /// Like [`Model::evaluate`], but gives up with [`InferError::Cancelled`]
    /// as soon as `cancel` completes.
    ///
    /// `cancel` is any future, e.g. a oneshot receiver mapped to `()` or a
    /// shutdown signal.
    pub async fn evaluate_until<R, C>(
        &self,
        reader: R,
        options: ImageOptions,
        cancel: C,
    ) -> Result<Predictions>
    where
        R: AsyncRead + Unpin,
        C: Future<Output = ()>,
    {
        let model = self.clone();
        race(reader, cancel, move |bytes| model.evaluate_bytes(bytes, &options)).await
    }

    pub async fn evaluate_with_deadline<R>(
        &self,
        reader: R,
        options: ImageOptions,
        deadline: Instant,
    ) -> Result<Predictions>
    where
        R: AsyncRead + Unpin,
    {
        self.evaluate_until(reader, options, tokio::time::sleep_until(deadline))
            .await
    }

    pub async fn evaluate_with_timeout<R>(
        &self,
        reader: R,
        options: ImageOptions,
        timeout: Duration,
    ) -> Result<Predictions>
    where
        R: AsyncRead + Unpin,
    {
        self.evaluate_until(reader, options, tokio::time::sleep(timeout))
            .await
    }
}

/// Reads the stream, hands the bytes to a blocking worker, and races the
/// whole thing against `cancel`. Cancellation is checked first, so a signal
/// that has already fired always wins.
async fn race<T, R, C, W>(reader: R, cancel: C, work: W) -> Result<T>
where
    T: Send + 'static,
    R: AsyncRead + Unpin,
    C: Future<Output = ()>,
    W: FnOnce(Vec<u8>) -> Result<T> + Send + 'static,
{
    let pipeline = async move {
        let mut reader = reader;
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .await
            .map_err(|e| InferError::InvalidImage(format!("failed to read image stream: {e}")))?;
        tokio::task::spawn_blocking(move || work(bytes))
            .await
            .map_err(|e| {
                base::log_error!("Inference worker failed: {e}");
                InferError::Execution(format!("inference worker failed: {e}"))
            })?
    };

    tokio::select! {
        biased;
        () = cancel => {
            base::log_warn!("Inference cancelled; in-flight work is left to finish");
            Err(InferError::Cancelled)
        }
        result = pipeline => result,
    }
}
