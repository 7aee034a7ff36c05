//! # Catalog Module
//!
//! Fixed reference data offered by the preference form: the pantry items a
//! household can tick off and the regional cuisine list with short
//! descriptions.

use std::fmt;

/// Pantry catalog grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PantryCategory {
    Spices,
    Sauces,
    Other,
}

impl PantryCategory {
    pub const ALL: [PantryCategory; 3] = [
        PantryCategory::Spices,
        PantryCategory::Sauces,
        PantryCategory::Other,
    ];
}

impl fmt::Display for PantryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PantryCategory::Spices => "Spices",
            PantryCategory::Sauces => "Sauces",
            PantryCategory::Other => "Other",
        };
        write!(f, "{}", name)
    }
}

/// One selectable pantry item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PantryItem {
    pub name: &'static str,
    pub category: PantryCategory,
    /// Units the item is usually measured in, most common first
    pub common_units: &'static [&'static str],
}

const fn pantry(
    name: &'static str,
    category: PantryCategory,
    common_units: &'static [&'static str],
) -> PantryItem {
    PantryItem {
        name,
        category,
        common_units,
    }
}

use PantryCategory::{Other, Sauces, Spices};

pub const PANTRY_ITEMS: &[PantryItem] = &[
    pantry("Salt", Spices, &["tsp", "tbsp", "pinch"]),
    pantry("Black Pepper", Spices, &["tsp", "pinch"]),
    pantry("Garlic Powder", Spices, &["tsp"]),
    pantry("Onion Powder", Spices, &["tsp"]),
    pantry("Cumin", Spices, &["tsp"]),
    pantry("Coriander", Spices, &["tsp"]),
    pantry("Turmeric", Spices, &["tsp"]),
    pantry("Ginger Powder", Spices, &["tsp"]),
    pantry("Cinnamon", Spices, &["tsp"]),
    pantry("Paprika", Spices, &["tsp"]),
    pantry("Chili Powder", Spices, &["tsp"]),
    pantry("Oregano", Spices, &["tsp"]),
    pantry("Basil", Spices, &["tsp"]),
    pantry("Thyme", Spices, &["tsp"]),
    pantry("Rosemary", Spices, &["tsp"]),
    pantry("Bay Leaves", Spices, &["whole"]),
    pantry("Cardamom", Spices, &["pod", "tsp"]),
    pantry("Nutmeg", Spices, &["tsp", "whole"]),
    pantry("Cloves", Spices, &["whole", "tsp"]),
    pantry("Allspice", Spices, &["tsp", "whole"]),
    pantry("Soy Sauce", Sauces, &["tbsp", "cup"]),
    pantry("Fish Sauce", Sauces, &["tbsp", "tsp"]),
    pantry("Oyster Sauce", Sauces, &["tbsp"]),
    pantry("Worcestershire Sauce", Sauces, &["tbsp", "tsp"]),
    pantry("Hot Sauce", Sauces, &["tbsp", "tsp"]),
    pantry("BBQ Sauce", Sauces, &["tbsp", "cup"]),
    pantry("Teriyaki Sauce", Sauces, &["tbsp", "cup"]),
    pantry("Hoisin Sauce", Sauces, &["tbsp"]),
    pantry("Sriracha", Sauces, &["tbsp", "tsp"]),
    pantry("Sesame Oil", Sauces, &["tbsp", "tsp"]),
    pantry("Olive Oil", Sauces, &["tbsp", "cup"]),
    pantry("Vegetable Oil", Sauces, &["tbsp", "cup"]),
    pantry("Balsamic Vinegar", Sauces, &["tbsp", "tsp"]),
    pantry("Rice Vinegar", Sauces, &["tbsp", "tsp"]),
    pantry("Apple Cider Vinegar", Sauces, &["tbsp", "tsp"]),
    pantry("Honey", Other, &["tbsp", "tsp"]),
    pantry("Maple Syrup", Other, &["tbsp", "cup"]),
    pantry("Brown Sugar", Other, &["cup", "tbsp"]),
    pantry("White Sugar", Other, &["cup", "tbsp"]),
    pantry("Flour", Other, &["cup"]),
    pantry("Cornstarch", Other, &["tbsp", "tsp"]),
    pantry("Baking Powder", Other, &["tsp"]),
    pantry("Baking Soda", Other, &["tsp"]),
    pantry("Vanilla Extract", Other, &["tsp"]),
    pantry("Coconut Milk", Other, &["can", "cup"]),
    pantry("Canned Tomatoes", Other, &["can"]),
    pantry("Tomato Paste", Other, &["tbsp", "can"]),
    pantry("Beans", Other, &["can", "cup"]),
    pantry("Rice", Other, &["cup"]),
    pantry("Pasta", Other, &["cup", "pound"]),
];

/// Pantry items in one category, catalog order
pub fn items_by_category(category: PantryCategory) -> Vec<&'static PantryItem> {
    PANTRY_ITEMS
        .iter()
        .filter(|item| item.category == category)
        .collect()
}

pub fn all_items() -> &'static [PantryItem] {
    PANTRY_ITEMS
}

/// Look up a pantry item ignoring case and surrounding whitespace
pub fn item_by_name(name: &str) -> Option<&'static PantryItem> {
    let name = name.trim();
    PANTRY_ITEMS
        .iter()
        .find(|item| item.name.eq_ignore_ascii_case(name))
}

/// World region a cuisine is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CuisineRegion {
    Asian,
    European,
    Americas,
    MiddleEasternAfrican,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cuisine {
    pub name: &'static str,
    pub region: CuisineRegion,
    pub description: &'static str,
}

const fn cuisine(name: &'static str, region: CuisineRegion, description: &'static str) -> Cuisine {
    Cuisine {
        name,
        region,
        description,
    }
}

use CuisineRegion::{Americas, Asian, European, MiddleEasternAfrican};

pub const CUISINES: &[Cuisine] = &[
    cuisine("Chinese", Asian, "Stir-fries, dumplings, and rice dishes"),
    cuisine("Japanese", Asian, "Sushi, ramen, and teriyaki"),
    cuisine("Korean", Asian, "Kimchi, bibimbap, and Korean BBQ"),
    cuisine("Thai", Asian, "Curries, pad thai, and fresh herbs"),
    cuisine("Vietnamese", Asian, "Pho, banh mi, and fresh rolls"),
    cuisine("Indian", Asian, "Curries, tandoori, and naan bread"),
    cuisine("Malaysian", Asian, "Laksa, rendang, and satay"),
    cuisine("Indonesian", Asian, "Nasi goreng, gado-gado, and sambal"),
    cuisine("Italian", European, "Pasta, pizza, and risotto"),
    cuisine("French", European, "Coq au vin, ratatouille, and croissants"),
    cuisine("Spanish", European, "Paella, tapas, and gazpacho"),
    cuisine("Greek", European, "Moussaka, souvlaki, and Greek salad"),
    cuisine("German", European, "Schnitzel, bratwurst, and pretzels"),
    cuisine("British", European, "Fish & chips, roasts, and pies"),
    cuisine("Polish", European, "Pierogi, kielbasa, and borscht"),
    cuisine("Mediterranean", European, "Olive oil, fresh vegetables, and seafood"),
    cuisine("Mexican", Americas, "Tacos, enchiladas, and mole"),
    cuisine("Brazilian", Americas, "Feijoada, pão de queijo, and churrasco"),
    cuisine("Peruvian", Americas, "Ceviche, lomo saltado, and quinoa"),
    cuisine("American", Americas, "Burgers, mac & cheese, and apple pie"),
    cuisine("Tex-Mex", Americas, "Fajitas, queso, and nachos"),
    cuisine("Caribbean", Americas, "Jerk chicken, plantains, and rice & peas"),
    cuisine("Southern US", Americas, "Fried chicken, grits, and cornbread"),
    cuisine("Canadian", Americas, "Poutine, maple syrup, and butter tarts"),
    cuisine("Lebanese", MiddleEasternAfrican, "Hummus, tabbouleh, and shawarma"),
    cuisine("Turkish", MiddleEasternAfrican, "Kebabs, pide, and baklava"),
    cuisine("Persian", MiddleEasternAfrican, "Saffron rice, kebabs, and stews"),
    cuisine("Israeli", MiddleEasternAfrican, "Falafel, shakshuka, and hummus"),
    cuisine("Moroccan", MiddleEasternAfrican, "Tagine, couscous, and preserved lemons"),
    cuisine("Ethiopian", MiddleEasternAfrican, "Injera, wat, and berbere spices"),
    cuisine("Egyptian", MiddleEasternAfrican, "Koshari, ful medames, and molokhia"),
    cuisine("South African", MiddleEasternAfrican, "Bobotie, biltong, and chakalaka"),
];

pub fn cuisines_in_region(region: CuisineRegion) -> Vec<&'static Cuisine> {
    CUISINES.iter().filter(|c| c.region == region).collect()
}

/// Short description of a listed cuisine, case-insensitive
pub fn cuisine_description(name: &str) -> Option<&'static str> {
    let name = name.trim();
    CUISINES
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .map(|c| c.description)
}
