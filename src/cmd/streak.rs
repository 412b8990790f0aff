// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use ripasso_core::Date;
use ripasso_core::Store;
use ripasso_core::compute_streak;

use crate::error::Fallible;
use crate::library::Library;

pub fn current_streak(library: &Library, today: Date) -> Fallible<u32> {
    let collection = library.db.load()?;
    Ok(compute_streak(&collection.events, today))
}

pub fn print_streak(directory: Option<String>) -> Fallible<()> {
    let library = Library::open(directory)?;
    let streak = current_streak(&library, Date::today())?;
    match streak {
        0 => println!("No current streak."),
        n => println!("{n} day streak."),
    }
    Ok(())
}
