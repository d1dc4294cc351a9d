//! Weapons and the inventory boundary
//!
//! Combat reads gear through `Inventory` and issues the few writes it
//! needs (unequip on throw, spend a stone, drop meat). `Loadout` is the
//! plain reference implementation.

use crate::combat::damage::{ArmorMitigation, DamageType};
use serde::{Deserialize, Serialize};

/// Weapon family, decides block quality and special actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponClass {
    Unarmed,
    Blade,
    Blunt,
    Spear,
}

impl WeaponClass {
    /// Fraction of a charge's damage removed by blocking with this class
    pub fn block_reduction(&self) -> f32 {
        match self {
            WeaponClass::Unarmed => 0.15,
            WeaponClass::Blade => 0.35,
            WeaponClass::Blunt => 0.40,
            WeaponClass::Spear => 0.45,
        }
    }

    pub fn is_throwable(&self) -> bool {
        matches!(self, WeaponClass::Spear)
    }

    /// Spears enable thrust and brace
    pub fn has_reach(&self) -> bool {
        matches!(self, WeaponClass::Spear)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub damage: f32,
    pub class: WeaponClass,
    pub damage_type: DamageType,
}

impl Weapon {
    pub fn spear() -> Self {
        Self {
            name: "spear".into(),
            damage: 8.0,
            class: WeaponClass::Spear,
            damage_type: DamageType::Pierce,
        }
    }

    pub fn knife() -> Self {
        Self {
            name: "knife".into(),
            damage: 5.0,
            class: WeaponClass::Blade,
            damage_type: DamageType::Sharp,
        }
    }

    pub fn club() -> Self {
        Self {
            name: "club".into(),
            damage: 6.0,
            class: WeaponClass::Blunt,
            damage_type: DamageType::Blunt,
        }
    }
}

/// What combat needs from the player's gear
pub trait Inventory {
    fn weapon(&self) -> Option<&Weapon>;

    /// Take the equipped weapon out of the hands (throwing it)
    fn unequip_weapon(&mut self) -> Option<Weapon>;

    fn equip_weapon(&mut self, weapon: Weapon);

    fn stone_count(&self) -> u32;

    /// Spend one stone; false if none were left
    fn remove_stone(&mut self) -> bool;

    fn armor(&self) -> Option<ArmorMitigation>;

    fn meat_kg(&self) -> f32;

    /// Drop everything edible, returning the amount dropped
    fn drop_all_meat(&mut self) -> f32;

    fn weapon_class(&self) -> WeaponClass {
        self.weapon().map(|w| w.class).unwrap_or(WeaponClass::Unarmed)
    }

    fn has_meat(&self) -> bool {
        self.meat_kg() > 0.0
    }
}

/// Reference inventory: one weapon slot, a stone pouch, worn armor, meat
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub weapon: Option<Weapon>,
    pub stones: u32,
    pub armor: Option<ArmorMitigation>,
    pub meat_kg: f32,
}

impl Loadout {
    pub fn new() -> Self {
        Self::default()
    }

    /// A hunter: spear, a few stones, leathers
    pub fn hunter() -> Self {
        Self {
            weapon: Some(Weapon::spear()),
            stones: 3,
            armor: Some(ArmorMitigation::leather()),
            meat_kg: 0.0,
        }
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_stones(mut self, stones: u32) -> Self {
        self.stones = stones;
        self
    }

    pub fn with_armor(mut self, armor: ArmorMitigation) -> Self {
        self.armor = Some(armor);
        self
    }

    pub fn with_meat(mut self, kg: f32) -> Self {
        self.meat_kg = kg.max(0.0);
        self
    }
}

impl Inventory for Loadout {
    fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    fn unequip_weapon(&mut self) -> Option<Weapon> {
        self.weapon.take()
    }

    fn equip_weapon(&mut self, weapon: Weapon) {
        self.weapon = Some(weapon);
    }

    fn stone_count(&self) -> u32 {
        self.stones
    }

    fn remove_stone(&mut self) -> bool {
        if self.stones == 0 {
            return false;
        }
        self.stones -= 1;
        true
    }

    fn armor(&self) -> Option<ArmorMitigation> {
        self.armor
    }

    fn meat_kg(&self) -> f32 {
        self.meat_kg
    }

    fn drop_all_meat(&mut self) -> f32 {
        std::mem::take(&mut self.meat_kg)
    }
}
