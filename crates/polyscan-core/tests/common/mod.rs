//! A fabricated target process laid out the way the game lays out its
//! managed objects.

#![allow(dead_code)]

use polyscan_core::memory::layout::SectionPath;
use polyscan_core::memory::{MockMemoryBuilder, MockMemoryReader};
use polyscan_core::{HolePolicy, Section, Snapshot, extract::Extractor};

pub const MODULE_BASE: u64 = 0x7F00_0000_0000;

/// Bump-allocating object heap over a mock memory map
pub struct FakeGame {
    builder: MockMemoryBuilder,
    next: u64,
}

impl FakeGame {
    pub fn new() -> Self {
        Self {
            builder: MockMemoryBuilder::new().base_address(MODULE_BASE),
            next: 0x10_0000,
        }
    }

    /// Fresh object address, each object gets its own page
    pub fn alloc(&mut self) -> u64 {
        let address = self.next;
        self.next += 0x1000;
        address
    }

    fn edit(&mut self, f: impl FnOnce(MockMemoryBuilder) -> MockMemoryBuilder) {
        let builder = std::mem::take(&mut self.builder);
        self.builder = f(builder);
    }

    pub fn u8(&mut self, address: u64, value: u8) -> &mut Self {
        self.edit(|b| b.write_u8(address, value));
        self
    }

    pub fn u16(&mut self, address: u64, value: u16) -> &mut Self {
        self.edit(|b| b.write_u16(address, value));
        self
    }

    pub fn u32(&mut self, address: u64, value: u32) -> &mut Self {
        self.edit(|b| b.write_u32(address, value));
        self
    }

    pub fn ptr(&mut self, address: u64, value: u64) -> &mut Self {
        self.edit(|b| b.write_u64(address, value));
        self
    }

    pub fn zeroed(&mut self, address: u64, size: usize) -> &mut Self {
        self.edit(|b| b.zeroed(address, size));
        self
    }

    /// Build the chain of a section and return the address it resolves to
    pub fn section(&mut self, section: Section) -> u64 {
        let SectionPath {
            module_offset,
            chain,
        } = section.path();
        let mut address = MODULE_BASE + module_offset;
        for &offset in chain {
            let object = self.alloc();
            self.ptr(address, object);
            address = object + offset;
        }
        address
    }

    /// Managed `T[]` of pointers; returns the array object
    pub fn pointer_array(&mut self, items: &[u64]) -> u64 {
        let array = self.alloc();
        self.u16(array + 0x18, items.len() as u16);
        for (i, &item) in items.iter().enumerate() {
            self.ptr(array + 0x20 + i as u64 * 8, item);
        }
        array
    }

    /// Managed `List<T>` over an array; returns the list object
    pub fn list_over(&mut self, array: u64, count: u16) -> u64 {
        let list = self.alloc();
        self.ptr(list + 0x10, array);
        self.u16(list + 0x18, count);
        list
    }

    /// `List<enum>` with 4-byte elements
    pub fn value_list(&mut self, values: &[u16]) -> u64 {
        let array = self.alloc();
        for (i, &value) in values.iter().enumerate() {
            self.u32(array + 0x20 + i as u64 * 4, value as u32);
        }
        self.list_over(array, values.len() as u16)
    }

    /// `List<byte>`
    pub fn byte_list(&mut self, values: &[u8]) -> u64 {
        let array = self.alloc();
        for (i, &value) in values.iter().enumerate() {
            self.u8(array + 0x20 + i as u64, value);
        }
        self.list_over(array, values.len() as u16)
    }

    /// `System.String`
    pub fn string(&mut self, text: &str) -> u64 {
        let object = self.alloc();
        let units: Vec<u16> = text.encode_utf16().collect();
        self.u16(object + 0x10, units.len() as u16);
        for (i, &unit) in units.iter().enumerate() {
            self.u16(object + 0x14 + i as u64 * 2, unit);
        }
        object
    }

    pub fn turn(&mut self, turn: u16) {
        let address = self.section(Section::Turn);
        self.u16(address, turn);
    }

    /// Player state array; `tribes` are player state objects
    pub fn tribes(&mut self, tribes: &[u64]) {
        let holder = self.section(Section::Tribes);
        let array = self.pointer_array(tribes);
        self.ptr(holder, array);
    }

    /// Tile array; a `None` slot is left unmapped so reading it fails
    pub fn map(&mut self, tiles: &[Option<u64>]) {
        let holder = self.section(Section::Map);
        let array = self.alloc();
        self.u16(array + 0x18, tiles.len() as u16);
        for (i, tile) in tiles.iter().enumerate() {
            if let Some(data) = tile {
                let element = self.alloc();
                self.ptr(element + 0x90, *data);
                self.ptr(array + 0x20 + i as u64 * 8, element);
            }
        }
        self.ptr(holder, array);
    }

    /// Unit list; `units` are unit state objects
    pub fn units(&mut self, units: &[u64]) {
        let holder = self.section(Section::Units);
        let mut elements = Vec::with_capacity(units.len());
        for &state in units {
            let element = self.alloc();
            self.ptr(element + 0x40, state);
            elements.push(element);
        }
        let array = self.pointer_array(&elements);
        let list = self.list_over(array, units.len() as u16);
        self.ptr(holder, list);
    }

    /// Unit state with owner, type and position set
    pub fn unit_state(&mut self, owner: u16, unit_type: u16, x: u16, y: u16) -> u64 {
        let state = self.alloc();
        self.zeroed(state + 0x1C, 62)
            .u16(state + 0x1C, owner)
            .u16(state + 0x24, unit_type)
            .u16(state + 0x30, x)
            .u16(state + 0x34, y);
        state
    }

    /// Tile data with only coordinates and terrain set
    pub fn plain_tile(&mut self, x: u16, y: u16, terrain: u16) -> u64 {
        let data = self.alloc();
        self.zeroed(data + 0x10, 100)
            .u16(data + 0x10, x)
            .u16(data + 0x12, y)
            .u16(data + 0x18, terrain);
        data
    }

    pub fn build(self) -> MockMemoryReader {
        self.builder.build()
    }
}

/// One tribe, a 2x2 map whose last tile holds a city, a resource and a unit
pub fn scenario() -> FakeGame {
    let mut game = FakeGame::new();
    game.turn(5);

    // Player state
    let tribe = game.alloc();
    game.zeroed(tribe + 0x10, 176)
        .u16(tribe + 0x10, 1)
        .u8(tribe + 0x34, 0)
        .u16(tribe + 0x40, 2)
        .u16(tribe + 0x9C, 5)
        .u16(tribe + 0xA0, 1200)
        .u16(tribe + 0xAC, 3);

    let username = game.string("Ana");
    let tech = game.value_list(&[1, 4]);
    let known = game.byte_list(&[1]);
    game.ptr(tribe + 0x18, username)
        .ptr(tribe + 0x60, tech)
        .ptr(tribe + 0x78, known);

    // started, not finished, turns below the current turn
    let task_a = game.alloc();
    game.zeroed(task_a + 0x10, 12)
        .u8(task_a + 0x10, 1)
        .u8(task_a + 0x18, 2);
    // never started
    let task_b = game.alloc();
    game.zeroed(task_b + 0x10, 12);
    // finished, turns not below the current turn
    let task_c = game.alloc();
    game.zeroed(task_c + 0x10, 12)
        .u8(task_c + 0x10, 1)
        .u8(task_c + 0x11, 1)
        .u8(task_c + 0x18, 9);
    let task_array = game.pointer_array(&[task_a, task_b, task_c]);
    let tasks = game.list_over(task_array, 3);
    game.ptr(tribe + 0x68, tasks);

    let relation = game.alloc();
    game.zeroed(relation + 0x10, 28)
        .u8(relation + 0x10, 1)
        .u16(relation + 0x14, 4)
        .u16(relation + 0x18, 1)
        .u16(relation + 0x20, 2)
        .u16(relation + 0x28, 3);
    let entries = game.alloc();
    game.u8(entries + 0x20, 1).ptr(entries + 0x30, relation);
    let dictionary = game.alloc();
    game.ptr(dictionary + 0x18, entries);
    game.ptr(tribe + 0x88, dictionary);

    game.tribes(&[tribe]);

    // Map
    let tile_0 = game.plain_tile(0, 0, 1);
    let tile_1 = game.plain_tile(1, 0, 1);
    let tile_2 = game.plain_tile(0, 1, 1);

    let city_tile = game.plain_tile(1, 1, 3);
    let explorers = game.byte_list(&[1]);
    game.u8(city_tile + 0x28, 1)
        .u8(city_tile + 0x29, 1)
        .ptr(city_tile + 0x30, explorers)
        .u16(city_tile + 0x3C, 1)
        .u16(city_tile + 0x40, 1)
        .u16(city_tile + 0x1C, 2)
        .u8(city_tile + 0x60, 1);

    let improvement = game.alloc();
    let name = game.string("Tuma");
    let rewards = game.value_list(&[5]);
    game.u16(improvement + 0x10, 1)
        .zeroed(improvement + 0x14, 22)
        .u16(improvement + 0x16, 2)
        .u16(improvement + 0x18, 3)
        .u16(improvement + 0x1A, 1)
        .u16(improvement + 0x1C, 2)
        .u16(improvement + 0x1E, 2)
        .u16(improvement + 0x22, 1)
        .u16(improvement + 0x26, 1)
        .ptr(improvement + 0x28, name)
        .ptr(improvement + 0x30, rewards);
    game.ptr(city_tile + 0x48, improvement);

    let resource = game.alloc();
    game.u16(resource + 0x10, 6);
    game.ptr(city_tile + 0x50, resource);

    game.map(&[Some(tile_0), Some(tile_1), Some(tile_2), Some(city_tile)]);

    // Units
    let unit = game.alloc();
    let effects = game.value_list(&[1, 2]);
    game.zeroed(unit + 0x1C, 62)
        .u16(unit + 0x1C, 1)
        .u16(unit + 0x24, 2)
        .u16(unit + 0x2C, 1)
        .u16(unit + 0x30, 1)
        .u16(unit + 0x34, 1)
        .u16(unit + 0x38, 1)
        .u16(unit + 0x3C, 1)
        .u16(unit + 0x48, 10)
        .u8(unit + 0x4A, 1)
        .u16(unit + 0x4C, 2)
        .u8(unit + 0x4E, 1)
        .u16(unit + 0x50, 3)
        .u16(unit + 0x56, 4)
        .ptr(unit + 0x60, effects);
    game.units(&[unit]);

    game
}

pub fn extract(reader: &MockMemoryReader, policy: HolePolicy) -> Snapshot {
    Extractor::new(reader)
        .with_hole_policy(policy)
        .extract()
        .unwrap()
}
