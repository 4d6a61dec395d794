use crate::hardware::keyboard::ScriptedInputProvider;
use crate::hardware::memory::{Memory, PROGRAM_SECTION_START};
use std::io;
use std::io::Write;

/// Output sink collecting everything written to it.
pub struct StringWriter {
    vec: Vec<u8>,
    flush_count: usize,
}
impl Write for StringWriter {
    fn write(&mut self, data: &[u8]) -> Result<usize, io::Error> {
        self.vec.write(data)
    }
    fn flush(&mut self) -> Result<(), io::Error> {
        self.flush_count += 1;
        Ok(())
    }
}
impl StringWriter {
    pub fn new() -> Self {
        let vec = Vec::<u8>::with_capacity(120);
        Self {
            vec,
            flush_count: 0,
        }
    }
    pub fn get_string(&self) -> String {
        String::from_utf8(self.vec.clone()).unwrap()
    }
    pub const fn flush_count(&self) -> usize {
        self.flush_count
    }
}

/// Output sink failing on every write.
pub struct BrokenWriter;
impl Write for BrokenWriter {
    fn write(&mut self, _data: &[u8]) -> Result<usize, io::Error> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stdout closed"))
    }
    fn flush(&mut self) -> Result<(), io::Error> {
        Ok(())
    }
}

/// Memory with `program` loaded at the program section start and a keyboard replaying `input`.
pub fn create_memory(program: &[u16], input: &str) -> Memory {
    let mut memory = Memory::new(Box::new(ScriptedInputProvider::new(input)));
    memory
        .load_program(PROGRAM_SECTION_START, program)
        .expect("Error loading program");
    memory
}
