mod port;

use crate::lcd::hd44780::{DISPLAY_WIDTH, ROW1_BASE, ROW2_BASE};
use crate::{PortError, PortResult};
use log::{trace, warn};
pub use port::*;
use std::fmt::Debug;

pub trait Hd44780Driver: Debug {
    /// Initializes the HD44780 controller: 4-bit bus, two lines, 5×8 font,
    /// display on with the cursor hidden, cleared and homed.
    ///
    /// Intended to run exactly once after power-on, though re-running it just
    /// re-clears and re-homes the display.
    fn init(&mut self) -> PortResult<()>;

    /// Clears the display and resets the address counter.
    fn clear_display(&mut self) -> PortResult<()> {
        self.send_command(0b00000001)
    }

    /// Sets the cursor to the home position.
    fn return_home(&mut self) -> PortResult<()> {
        self.send_command(0b00000010)
    }

    /// Sets the display on/off, cursor on/off, and blinking on/off.
    fn set_display_control(
        &mut self,
        display_on: bool,
        cursor_on: bool,
        blink_on: bool,
    ) -> PortResult<()> {
        let mut command = 0b00001000;
        if display_on {
            command |= 0b00000100;
        }
        if cursor_on {
            command |= 0b00000010;
        }
        if blink_on {
            command |= 0b00000001;
        }
        self.send_command(command)
    }

    /// Sets the function set.
    fn function_set(&mut self, data_length: bool, two_lines: bool, font: bool) -> PortResult<()> {
        let mut command = 0b00100000;
        if data_length {
            command |= 0b00010000;
        }
        if two_lines {
            command |= 0b00001000;
        }
        if font {
            command |= 0b00000100;
        }
        self.send_command(command)
    }

    /// Sets the DDRAM address.
    fn set_ddram_address(&mut self, address: u8) -> PortResult<()> {
        if address > 0b01111111 {
            return Err(PortError::InvalidArgument);
        }
        let command = 0b10000000 | address;
        self.send_command(command)
    }

    /// Writes a string at the current cursor position.
    ///
    /// Each character goes out as one data byte and the controller advances
    /// its own address counter, so text past the visible columns ends up
    /// wherever the controller's addressing rule puts it. Non-ASCII
    /// characters are replaced with `?`.
    fn write_str(&mut self, s: &str) -> PortResult<()> {
        for c in s.chars() {
            if c.is_ascii() {
                self.send_data(c as u8)?;
            } else {
                warn!("Non-ASCII character: {}", c);
                self.send_data(b'?')?;
            }
        }
        Ok(())
    }

    /// Writes a string starting at the given position.
    ///
    /// `row` is 1 or 2, `col` counts from 0. Any other position skips the
    /// address set without signaling: the text still goes out, at whatever
    /// address the display is currently at. The column is additionally masked
    /// to 4 bits in the command encoding; the width guard keeps out-of-range
    /// columns from ever reaching the mask.
    fn write_str_at(&mut self, row: u8, col: u8, s: &str) -> PortResult<()> {
        if row == 1 && col < DISPLAY_WIDTH {
            self.set_ddram_address(ROW1_BASE | (col & 0x0F))?;
        } else if row == 2 && col < DISPLAY_WIDTH {
            self.set_ddram_address(ROW2_BASE | (col & 0x0F))?;
        } else {
            trace!("Position ({}, {}) off the display, address set skipped", row, col);
        }
        self.write_str(s)
    }

    // Low-level commands
    // These raw commands are used by the high-level functions above.

    /// Sends a command to the HD44780 controller.
    /// Sets the RS line to 0 (command).
    fn send_command(&mut self, command: u8) -> PortResult<()>;

    /// Sends data to the HD44780 controller.
    /// Sets the RS line to 1 (data).
    fn send_data(&mut self, data: u8) -> PortResult<()>;
}
