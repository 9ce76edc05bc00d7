//! Tensorboard logger
use super::{Event, Loggable, Logger};
use enum_map::EnumMap;
use std::fmt;
use std::path::Path;
use tensorboard_rs::summary_writer::SummaryWriter as TbSummaryWriter;

/// Logger that writes scalar summaries to a tensorboard event file.
///
/// Values are tagged `<event>/<name>` and indexed by the number of completed
/// instances of their event.
pub struct TensorBoardLogger {
    writer: TbSummaryWriter,
    event_index: EnumMap<Event, usize>,
}

impl fmt::Debug for TensorBoardLogger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TensorBoardLogger")
            .field("event_index", &self.event_index)
            .finish()
    }
}

impl TensorBoardLogger {
    pub fn new<P: AsRef<Path>>(log_dir: P) -> Self {
        Self {
            writer: TbSummaryWriter::new(log_dir),
            event_index: EnumMap::default(),
        }
    }
}

impl Logger for TensorBoardLogger {
    #[allow(clippy::cast_possible_truncation)]
    fn log(&mut self, event: Event, name: &str, value: Loggable) {
        if let Loggable::Scalar(value) = value {
            let tag = format!("{}/{}", event.name(), name);
            self.writer
                .add_scalar(&tag, value as f32, self.event_index[event]);
        }
    }

    fn done(&mut self, event: Event) {
        self.event_index[event] += 1;
        self.writer.flush();
    }
}
