use crate::PackageMetadata;

pub(crate) const GO_SOURCE: &str = r#"package main

import (
	"fmt"

	"github.com/greenpau/versioned"
)

var (
	app        *versioned.PackageManager
	appVersion string
	gitBranch  string
	gitCommit  string
)

func init() {
	app = versioned.NewPackageManager("demo")
	app.SetVersion(appVersion, "1.0.0")
	app.SetGitBranch(gitBranch, "main")
	app.SetGitCommit(gitCommit, "v1.0.0-1-g0c85fbc")
	if app.Name == "" {
		app.Name = "demo"
	}
}

func main() {
	app.SetVersion(appVersion, "0.0.1")
	fmt.Println(app.Banner())
}
"#;

pub(crate) const GO_SOURCE_UPDATED: &str = r#"package main

import (
	"fmt"

	"github.com/greenpau/versioned"
)

var (
	app        *versioned.PackageManager
	appVersion string
	gitBranch  string
	gitCommit  string
)

func init() {
	app = versioned.NewPackageManager("demo")
	app.SetVersion(appVersion, "1.2.3")
	app.SetGitBranch(gitBranch, "release")
	app.SetGitCommit(gitCommit, "v1.2.3-0-gabc1234")
	if app.Name == "" {
		app.Name = "demo"
	}
}

func main() {
	app.SetVersion(appVersion, "0.0.1")
	fmt.Println(app.Banner())
}
"#;

pub(crate) const GO_SOURCE_UNREFERENCED: &str = r#"package main

func init() {
	app = versioned.NewPackageManager("demo")
	app.SetVersion(appVersion, "1.0.0")
}
"#;

pub(crate) const GO_SOURCE_UNINITIALIZED: &str = r#"package main

import "github.com/greenpau/versioned"

func init() {
	app.SetVersion(appVersion, "1.0.0")
}
"#;

pub(crate) const GO_SOURCE_WITHOUT_VERSION: &str = r#"package main

import "github.com/greenpau/versioned"

func init() {
	app = versioned.NewPackageManager("demo")
	app.SetGitBranch(gitBranch, "main")
}
"#;

pub(crate) const PYTHON_SOURCE: &str = r#"#!/usr/bin/env python3
"""Demo module."""

__version__ = '1.0.0'

def main():
    print(__version__)
"#;

pub(crate) const PYTHON_SOURCE_UPDATED: &str = r#"#!/usr/bin/env python3
"""Demo module."""

__version__ = '1.2.3'

def main():
    print(__version__)
"#;

pub(crate) const JAVASCRIPT_SOURCE: &str = r#"const pkg = {
  Name: 'demo',
  Version: '1.0.0',
  Description: 'demo package',
};

export default pkg;
"#;

pub(crate) const JAVASCRIPT_SOURCE_UPDATED: &str = r#"const pkg = {
  Name: 'demo',
  Version: '1.2.3',
  Description: 'demo package',
};

export default pkg;
"#;

pub(crate) const MARKDOWN_WITHOUT_TOC: &str = "# Demo

Intro text.

## Getting Started

### Install

## Usage

```bash
## not a heading
```

## Usage
";

pub(crate) const MARKDOWN_WITH_TOC: &str = "# Demo

Intro text.

<!-- begin-markdown-toc -->
## Table of Contents

* [Getting Started](#getting-started)
  * [Install](#install)
* [Usage](#usage)
* [Usage](#usage-1)

<!-- end-markdown-toc -->

## Getting Started

### Install

## Usage

```bash
## not a heading
```

## Usage
";

pub(crate) fn release_metadata() -> PackageMetadata {
	let mut metadata = PackageMetadata::new("demo");
	metadata.set_version("1.2.3", "");
	metadata.set_git_branch("release", "");
	metadata.set_git_commit("v1.2.3-0-gabc1234", "");
	metadata
}
