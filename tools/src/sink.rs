//! CSV frame persistence: one file per fired frame, one row per body.

use granular_core::output::{FrameSink, OutputEvent};
use granular_core::physics::FrameState;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub struct CsvFrameSink {
    root: PathBuf,
}

impl CsvFrameSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FrameSink for CsvFrameSink {
    fn write_frame(
        &mut self,
        directory: &str,
        basename: &str,
        event: &OutputEvent,
        frame: &FrameState,
    ) -> std::io::Result<()> {
        let dir = self.root.join(directory);
        fs::create_dir_all(&dir)?;

        let mut file = fs::File::create(dir.join(basename))?;
        writeln!(file, "# frame {} tick {} t {}", event.frame_index, event.tick, event.elapsed_time)?;
        writeln!(file, "body_id,x,y,z,vx,vy,vz")?;
        for body in &frame.bodies {
            writeln!(
                file,
                "{},{},{},{},{},{},{}",
                body.body_id,
                body.position.x,
                body.position.y,
                body.position.z,
                body.velocity.x,
                body.velocity.y,
                body.velocity.z,
            )?;
        }
        Ok(())
    }
}
