//! Mock register file and I2C bus for testing the sensor drivers

use device_driver::RegisterInterface;
use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

/// Records operations performed on the mock interface
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Read register operation
    ReadRegister {
        /// Register address
        address: u8,
        /// Value that was returned
        value: u8,
    },
    /// Write register operation
    WriteRegister {
        /// Register address
        address: u8,
        /// Value that was written
        value: u8,
    },
}

/// Shared state for mock interface (uses interior mutability)
#[derive(Debug, Default)]
struct MockState {
    /// Simulated register values
    registers: HashMap<u8, u8>,

    /// Operations log for verification
    operations: Vec<Operation>,

    /// Failure injection flags
    fail_next_read: bool,
    fail_next_write: bool,

    /// Bits that keep their value whatever is written, per register
    stuck_bits: HashMap<u8, u8>,

    /// Blocks loaded into the register file when a read starts at the key
    read_queues: HashMap<u8, VecDeque<Vec<u8>>>,
}

impl MockState {
    fn load_block(&mut self, address: u8, bytes: &[u8]) {
        for (i, &byte) in bytes.iter().enumerate() {
            self.registers.insert(address.wrapping_add(i as u8), byte);
        }
    }
}

/// Mock interface for testing
///
/// Clones share the same register file, so a test keeps one clone to
/// preset and inspect registers while the driver owns the other.
#[derive(Clone, Default)]
pub struct MockInterface {
    state: Rc<RefCell<MockState>>,
}

impl MockInterface {
    /// Create a mock with every register reading 0
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock with the given registers preset
    pub fn with_registers(registers: &[(u8, u8)]) -> Self {
        let mock = Self::new();
        for &(address, value) in registers {
            mock.set_register(address, value);
        }
        mock
    }

    /// Set a register value
    pub fn set_register(&self, address: u8, value: u8) {
        self.state.borrow_mut().registers.insert(address, value);
    }

    /// Get a register value
    pub fn get_register(&self, address: u8) -> u8 {
        self.state
            .borrow()
            .registers
            .get(&address)
            .copied()
            .unwrap_or(0)
    }

    /// Set consecutive registers starting at `address`
    pub fn set_bytes(&self, address: u8, bytes: &[u8]) {
        self.state.borrow_mut().load_block(address, bytes);
    }

    /// Queue a block to be loaded the next time a read starts at `address`
    ///
    /// Once the queue is empty the last block stays in place.
    pub fn queue_read(&self, address: u8, bytes: &[u8]) {
        self.state
            .borrow_mut()
            .read_queues
            .entry(address)
            .or_default()
            .push_back(bytes.to_vec());
    }

    /// Make the bits in `mask` of `address` ignore writes
    pub fn stick_bits(&self, address: u8, mask: u8) {
        self.state.borrow_mut().stuck_bits.insert(address, mask);
    }

    /// Inject a read failure on the next read operation
    pub fn fail_next_read(&self) {
        self.state.borrow_mut().fail_next_read = true;
    }

    /// Inject a write failure on the next write operation
    pub fn fail_next_write(&self) {
        self.state.borrow_mut().fail_next_write = true;
    }

    /// Get the operations log
    pub fn operations(&self) -> Vec<Operation> {
        self.state.borrow().operations.clone()
    }

    /// Clear the operations log
    pub fn clear_operations(&self) {
        self.state.borrow_mut().operations.clear();
    }

    /// Values written to `address`, in order
    pub fn writes_to(&self, address: u8) -> Vec<u8> {
        self.state
            .borrow()
            .operations
            .iter()
            .filter_map(|op| match *op {
                Operation::WriteRegister { address: a, value } if a == address => Some(value),
                _ => None,
            })
            .collect()
    }

    /// Number of write operations recorded
    pub fn write_count(&self) -> usize {
        self.state
            .borrow()
            .operations
            .iter()
            .filter(|op| matches!(op, Operation::WriteRegister { .. }))
            .count()
    }
}

/// Mock error type
#[derive(Debug, Clone, PartialEq)]
pub enum MockError {
    /// Simulated communication error
    Communication,
}

impl RegisterInterface for MockInterface {
    type Error = MockError;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        if state.fail_next_read {
            state.fail_next_read = false;
            return Err(MockError::Communication);
        }

        let queued = state
            .read_queues
            .get_mut(&address)
            .and_then(VecDeque::pop_front);
        if let Some(block) = queued {
            state.load_block(address, &block);
        }

        // Register pointer auto-increments across a burst
        for (i, byte) in read_data.iter_mut().enumerate() {
            let reg_addr = address.wrapping_add(i as u8);
            *byte = state.registers.get(&reg_addr).copied().unwrap_or(0);
            state.operations.push(Operation::ReadRegister {
                address: reg_addr,
                value: *byte,
            });
        }

        Ok(())
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        _size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();

        if state.fail_next_write {
            state.fail_next_write = false;
            return Err(MockError::Communication);
        }

        for (i, &byte) in write_data.iter().enumerate() {
            let reg_addr = address.wrapping_add(i as u8);
            let stuck = state.stuck_bits.get(&reg_addr).copied().unwrap_or(0);
            let old = state.registers.get(&reg_addr).copied().unwrap_or(0);
            state
                .registers
                .insert(reg_addr, (old & stuck) | (byte & !stuck));

            state.operations.push(Operation::WriteRegister {
                address: reg_addr,
                value: byte,
            });
        }

        Ok(())
    }
}

/// Mock I2C bus with one [`MockInterface`] register file per device address
///
/// A write transfer sets the register pointer from its first byte and
/// writes the rest; a read transfer reads from the pointer.
#[derive(Default)]
pub struct MockI2cBus {
    devices: HashMap<u8, MockInterface>,
    pointers: HashMap<u8, u8>,
}

impl MockI2cBus {
    /// Create an empty bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a device at `address`
    pub fn attach(&mut self, address: u8, device: MockInterface) {
        self.devices.insert(address, device);
    }
}

impl ErrorType for MockI2cBus {
    type Error = ErrorKind;
}

impl I2c for MockI2cBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [embedded_hal::i2c::Operation<'_>],
    ) -> Result<(), Self::Error> {
        let device = self
            .devices
            .get_mut(&address)
            .ok_or(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))?;
        let pointer = self.pointers.entry(address).or_insert(0);

        // Adjacent writes form one transfer: pointer byte, then data
        let mut pending: Vec<u8> = Vec::new();
        for operation in operations.iter_mut() {
            match operation {
                embedded_hal::i2c::Operation::Write(bytes) => pending.extend_from_slice(bytes),
                embedded_hal::i2c::Operation::Read(buffer) => {
                    flush_write(device, pointer, &mut pending)?;
                    device
                        .read_register(*pointer, (buffer.len() * 8) as u32, buffer)
                        .map_err(|_| ErrorKind::Bus)?;
                }
            }
        }
        flush_write(device, pointer, &mut pending)?;

        Ok(())
    }
}

fn flush_write(
    device: &mut MockInterface,
    pointer: &mut u8,
    pending: &mut Vec<u8>,
) -> Result<(), ErrorKind> {
    let Some((&register, data)) = pending.split_first() else {
        return Ok(());
    };
    *pointer = register;
    if !data.is_empty() {
        device
            .write_register(register, (data.len() * 8) as u32, data)
            .map_err(|_| ErrorKind::Bus)?;
    }
    pending.clear();
    Ok(())
}
