// SPDX-License-Identifier: Apache-2.0

mod global_conf;
mod show;
