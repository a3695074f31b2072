
// struct to handle file buffers


use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;
use log::debug;
use super::error::{Error, Result};

pub struct FileBufferHelper<'a> {
    pub path: &'a Path,
    pub buffer_reader: BufReader<File>,
    pub line: String,
    pub line_number: usize,
}

impl<'a> FileBufferHelper<'a> {
    pub fn new(file: &'a Path) -> Result<FileBufferHelper<'a>> {
        // initialise instance of FileBufferHelper
        let file_open = File::open(file).map_err(|e| Error::io(file, e))?;
        debug!("FileHelper created for: {:?}", file);
        Ok(Self {
            path: file,
            buffer_reader: BufReader::new(file_open),
            line: String::new(),
            line_number: 0,
        })
    }

    // read the next line into `line` without the line terminator
    // returns false at the end of the file
    pub fn next_line(&mut self) -> Result<bool> {
        self.line.clear();
        let read = self.buffer_reader.read_line(&mut self.line)
            .map_err(|e| Error::io(self.path, e))?;
        if read == 0 {
            return Ok(false);
        }
        while self.line.ends_with('\n') || self.line.ends_with('\r') {
            self.line.pop();
        }
        self.line_number += 1;
        Ok(true)
    }

    pub fn buffer_reset(&mut self) -> Result<()> {
        // reset buffer to position 0
        self.buffer_reader.seek(SeekFrom::Start(0))
            .map_err(|e| Error::io(self.path, e))?;
        self.line.clear();
        self.line_number = 0;
        Ok(())
    }
}
